#![forbid(unsafe_code)]

//! Core domain model and business logic for the mnemo flashcard system.
//!
//! This crate provides:
//! - Domain types (decks, flashcards, sessions, statistics)
//! - The entity store with CRUD and due-card queries
//! - Review scheduling and mastery tracking
//! - Study session aggregation into per-day performance history
//! - Persistence (JSON snapshot, CSV export)
//!
//! The store is a plain owned value; presentation layers hold it and call
//! through the functions re-exported below.

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod scheduler;
pub mod session;
pub mod history;
pub mod persist;
pub mod export;
pub mod starter;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, HistoryConfig, SchedulerConfig};
pub use store::Store;
pub use scheduler::{plan_review, record_review, record_review_at, ReviewPlan};
pub use session::{
    end_study_session, end_study_session_at, start_study_session, start_study_session_at,
    SessionSummary,
};
pub use persist::Snapshot;
pub use export::export_performance_csv;
pub use starter::starter_store;
