// src/core/mod.rs
pub mod prefs;
pub mod types;
