//! Router module.
//!
//! # Data Flow
//! ```text
//! RouteTable::builder()...build()      (startup, validated once)
//!     → register_routes(table, options)
//!     → RouterHandle
//!
//! navigate(path) / back() / forward()
//!     → table.resolve(path)             (pure, first match wins)
//!     → follow redirects
//!     → commit Navigation::Active | Navigation::NotFound
//! ```

pub mod engine;
pub mod pattern;
pub mod table;

pub use engine::{
    register_routes, Navigation, NavigationTrigger, RouterHandle, RouterOptions, NAVIGATION_TARGET,
};
pub use pattern::{canonical_path, split_path, Params, PathMatch, PathPattern};
pub use table::{Resolution, Route, RouteTable, RouteTableBuilder, RouteTarget};
