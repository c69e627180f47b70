//! Agents and the responders that speak for them.

pub mod agent;
pub mod responder;

pub use agent::Agent;
pub use responder::{AutoReply, ModelResponder, Reply, Responder, Turn};
