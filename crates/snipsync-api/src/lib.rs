//! # snipsync-api
//!
//! HTTP API layer for SnipSync built on Axum: route definitions, request
//! handlers, auth extractors, and DTOs. The `AppError` → HTTP status
//! mapping lives with the error type in `snipsync-core`.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;
