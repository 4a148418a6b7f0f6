//! Snippet CRUD and view assembly.

pub mod service;

pub use service::{CommentView, NewSnippetData, SnippetDetail, SnippetService, SnippetSummary};
