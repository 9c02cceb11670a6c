//! Request handlers.

pub mod file;
pub mod health;
