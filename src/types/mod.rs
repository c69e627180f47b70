//! Core types: conversation messages, transcripts and model requests.

pub mod generation;
pub mod message;
pub mod transcript;
pub mod usage;

pub use generation::*;
pub use message::*;
pub use transcript::*;
pub use usage::*;
