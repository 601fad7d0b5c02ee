//! Utility functions for working with A2A types.
//!
//! Helpers for building outgoing messages and pulling text or data back out
//! of what the agent returns.

pub mod constants;
pub mod message;
pub mod parts;
pub mod task;

pub use constants::*;
pub use message::*;
pub use parts::*;
pub use task::*;
