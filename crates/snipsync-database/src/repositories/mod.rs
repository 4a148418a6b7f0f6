//! Repository implementations for all SnipSync entities.

pub mod comment;
pub mod share_code;
pub mod snippet;
pub mod upvote;
pub mod user;

pub use comment::CommentRepository;
pub use share_code::{InsertOutcome, PgShareCodeStore, ShareCodeStore};
pub use snippet::SnippetRepository;
pub use upvote::UpvoteRepository;
pub use user::UserRepository;
