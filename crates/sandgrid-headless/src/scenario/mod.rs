//! Scripted scenarios: timed paint/erase/control actions replayed against a world

pub mod actions;
pub mod builtin;
pub mod definition;
pub mod executor;

pub use actions::{ScenarioAction, ScenarioStep};
pub use builtin::{BUILTIN_SCENARIOS, builtin};
pub use definition::ScenarioDefinition;
pub use executor::ScenarioExecutor;
