// src/lib.rs

pub mod app;
pub mod catalog;
pub mod core;
pub mod error;
pub mod persistence;
pub mod recipe;

pub use crate::app::App;
pub use crate::catalog::Catalog;
pub use crate::core::prefs::{PreferenceStore, ResetScope};
pub use crate::persistence::{FileStore, KeyValueStore, MemoryStore};
