//! Pluckboard Application
//!
//! Drives the canvas from a recorded gesture script and renders the
//! resulting frame into a display list.

mod script;

pub use script::{AppError, FrameSummary, Script, ScriptStep, run_script};
