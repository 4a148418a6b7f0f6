//! Background tasks for SnipSync.
//!
//! This crate provides:
//! - A cron scheduler for periodic maintenance tasks
//! - The expired share-code sweep job
//!
//! The sweep is pure garbage collection: expired codes are already deleted
//! lazily on read, so nothing is ever *served* stale — without the sweep the
//! table merely grows with abandoned codes.

pub mod jobs;
pub mod scheduler;

pub use scheduler::CronScheduler;
