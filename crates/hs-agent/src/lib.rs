//! Hearthside agent: library crate for the conversational home front-end.
//!
//! Re-exports all modules so external crates (e.g. `hs-e2e-tests`) can
//! drive `IntentRouter` with their own gateway, model and console.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod mock;
pub mod prompt;
pub mod router;

pub use catalog::{DirectiveCatalog, DirectiveSpec};
pub use config::{AgentConfig, SessionConfig};
pub use console::{Console, LineConsole, RouterEvent, StdConsole};
pub use error::{AgentError, AgentResult};
pub use mock::ScriptedConsole;
pub use router::{IntentRouter, RouterState};
