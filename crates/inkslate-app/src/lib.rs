//! Inkslate Application
//!
//! Drives a [`DrawingSurface`](inkslate_core::DrawingSurface) from a recorded
//! script of pointer and toolbar events and exports the result.

mod script;

pub use script::{Command, Script, ScriptError, ScriptResult, run_script};
