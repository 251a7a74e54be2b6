//! Data models shared by the engine and its front ends.

pub mod amount;
pub mod config;
