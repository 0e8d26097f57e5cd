//! Vidsrc Lookup Core Library
//!
//! This crate turns a free-text title into a vidsrc playback link through a
//! short conversation.
//!
//! # Features
//! - Search the title database and extract ranked candidates
//! - Per-user dialogue: pick a candidate, then season and episode for series
//! - Movie and episode deep links

pub mod client;
pub mod dialogue;
pub mod error;
pub mod extractor;
pub mod link;
pub mod parser;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, ProviderClient};
pub use dialogue::{DialogueController, DialogueState, Input, Outcome, Reply, Session, SessionId};
pub use error::{LookupError, Result};
pub use extractor::Extractor;
pub use link::DeepLink;
pub use types::{Candidate, MediaKind};
