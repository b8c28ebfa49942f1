pub mod reports;
pub mod scenario;
pub mod tester;
pub mod walk;

pub use scenario::{get_scenario, list_scenarios, scenario_keys};
pub use tester::{LogicTester, ScenarioResult};
