//! Share-code subsystem — minting and resolving temporary snippet codes.
//!
//! A share code is a six-character `[a-z0-9]` token that grants time-boxed
//! read access to one snippet, primarily so the editor extension can import
//! it. Codes live for five minutes, may be redeemed any number of times
//! within that window, and are deleted lazily on expired reads plus swept
//! periodically by the worker.

pub mod error;
pub mod generator;
pub mod service;

pub use error::ShareCodeError;
pub use generator::{CandidateSource, RandomCodeGenerator};
pub use service::{IssuedCode, ShareCodeService, SnippetLookup};
