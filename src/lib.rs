/*
 * Responsibility
 * - モジュール構成の宣言と公開 API の re-export（ロジックは置かない）
 */
pub mod card;
pub mod config;
pub mod error;
pub mod post;
pub mod remote;
pub mod state;
pub mod view;

pub use card::{CommitOutcome, DeleteOutcome, PreviewTicket, TweetCard};
pub use config::{CommitFailurePolicy, Config, ConfigError};
pub use error::{CardError, ValidationError};
pub use post::{FileSelection, Post};
pub use state::CardDeps;
