//! The GridPath UI route table.
//!
//! ```text
//! /scenarios        -> ScenarioList
//! /scenario/:id     -> ScenarioDetail   (id handed over unvalidated)
//! /scenario-new     -> ScenarioNew
//! /settings         -> Settings
//! /                 => redirect /scenarios
//! ```

use std::fmt;

use navi_nexus::RouteTable;

pub const SCENARIOS_PATH: &str = "/scenarios";
pub const SCENARIO_NEW_PATH: &str = "/scenario-new";
pub const SETTINGS_PATH: &str = "/settings";

/// Name of the parameter bound by the scenario detail route.
pub const SCENARIO_ID_PARAM: &str = "id";

/// Handler identities: one per view the shell can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    ScenarioList,
    ScenarioDetail,
    ScenarioNew,
    Settings,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::ScenarioList => "Scenarios",
            View::ScenarioDetail => "Scenario",
            View::ScenarioNew => "New Scenario",
            View::Settings => "Settings",
        };
        f.write_str(name)
    }
}

/// Characters that would split or truncate the `id` segment of a path.
pub const RESERVED_ID_CHARS: [char; 3] = ['/', '?', '#'];

/// True if `id` is bound back unchanged from `scenario_path(id)`.
pub fn is_valid_scenario_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(RESERVED_ID_CHARS)
}

/// Path of the detail view for `id`.
pub fn scenario_path(id: &str) -> String {
    format!("/scenario/{id}")
}

/// Build the application route table.
pub fn route_table() -> navi_nexus::Result<RouteTable<View>> {
    RouteTable::builder()
        .route(SCENARIOS_PATH, View::ScenarioList)
        .route("scenario/:id", View::ScenarioDetail)
        .route(SCENARIO_NEW_PATH, View::ScenarioNew)
        .route(SETTINGS_PATH, View::Settings)
        .redirect("", SCENARIOS_PATH)
        .build()
}
