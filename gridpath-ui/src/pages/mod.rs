pub mod not_found;
pub mod scenario_detail;
pub mod scenario_new;
pub mod scenarios;
pub mod settings;

pub use not_found::NotFoundPage;
pub use scenario_detail::ScenarioDetailPage;
pub use scenario_new::NewScenarioPage;
pub use scenarios::ScenariosPage;
pub use settings::SettingsPage;
