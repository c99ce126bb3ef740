pub mod application;
pub mod component;
pub mod error;
pub mod router;

pub use error::{Error, Result};

// Re-export common types for convenience
pub use application::{AppContext, Application, Context, EventContext};
pub use component::{Action, AnyComponent, Component, Event};
pub use router::{
    register_routes, Navigation, Params, PathMatch, Resolution, Route, RouteTable, RouterHandle,
    RouterOptions, NAVIGATION_TARGET,
};
