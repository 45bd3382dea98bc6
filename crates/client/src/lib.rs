//! Scripted host for the interaction router.
//!
//! The binary loads a scenario together with a list of input events,
//! converts screen pixels to board tiles and replays the events through an
//! [`runtime::InteractionRouter`], logging what happened after each one.

pub mod config;
pub mod logging;
pub mod replay;

pub use config::ClientConfig;
pub use replay::{ReplaySummary, Replayer, Script, ScriptEvent};
