//! Tool definitions module.
//!
//! One file per tool, plus the result helpers they share.

mod api;
mod apis;
pub mod common;
mod modules;

pub use api::{GetApiParams, GetApiTool};
pub use apis::{GetApisParams, GetApisTool};
pub use modules::{GetModulesParams, GetModulesTool};
