//! Multi-turn lookup dialogue
//!
//! - `session`: State machine of a single conversation
//! - `controller`: Registry dispatching inputs to sessions
//! - `render`: Reply texts

pub mod controller;
pub mod render;
pub mod session;

pub use controller::{DialogueController, Input, SessionId};
pub use session::{DialogueState, Outcome, Reply, Session};
