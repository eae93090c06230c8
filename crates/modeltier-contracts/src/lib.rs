//! Data contracts shared by the tiering engine and its callers: tier levels,
//! the agent/category role tables, the user override tree and the emitted
//! oh-my-opencode config.

pub mod assembled;
pub mod models;
pub mod overrides;
pub mod ranking;
pub mod roles;
