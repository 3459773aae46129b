//! Shared utility modules used across Kotodama components.

pub mod script;
