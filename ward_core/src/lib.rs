#![forbid(unsafe_code)]

//! Core domain model and scheduling logic for the ward registry.
//!
//! This crate provides:
//! - Domain types (patients, priority classes, operations)
//! - Emergency-first admission scheduler
//! - Ordered index and archive of discharged patients
//! - Undo/redo action history
//! - Configuration, logging and export

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod index;
pub mod archive;
pub mod history;
pub mod scheduler;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use index::{Inorder, OrderedIndex};
pub use archive::ArchiveLog;
pub use history::ActionHistory;
pub use scheduler::{sorted_view, AdmissionScheduler};
pub use export::{write_archive_csv, write_snapshot_json, RegistrySnapshot};
