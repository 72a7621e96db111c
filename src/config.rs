/*
 * Responsibility
 * - 環境変数や設定の読み込み (コレクション名、ストレージ接頭辞、上限値など)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;

/// What happens to the edit mode when a commit fails remotely.
///
/// The default drops back to read mode and silently discards the draft;
/// keeping that an explicit setting makes any change of policy a
/// deliberate, visible one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitFailurePolicy {
    /// Return to read mode even though nothing was saved (legacy behavior).
    #[default]
    ReturnToRead,
    /// Stay in edit mode so the user can retry or cancel.
    StayInEdit,
}

impl CommitFailurePolicy {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "return-to-read" => Some(Self::ReturnToRead),
            "stay-in-edit" => Some(Self::StayInEdit),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    /// Record-store collection holding posts.
    pub collection: String,
    /// Blob path prefix; photos live at `{prefix}/{user_id}/{post_id}`.
    pub storage_prefix: String,
    /// Upload size cap in bytes.
    pub max_upload_bytes: usize,
    /// Draft length bound, enforced by the rendered input.
    pub draft_max_chars: usize,
    pub commit_failure_policy: CommitFailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collection: "tweets".to_string(),
            storage_prefix: "tweets".to_string(),
            max_upload_bytes: 1024 * 768,
            draft_max_chars: 180,
            commit_failure_policy: CommitFailurePolicy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let collection = std::env::var("TWEET_COLLECTION").unwrap_or(defaults.collection);

        let storage_prefix =
            std::env::var("TWEET_STORAGE_PREFIX").unwrap_or(defaults.storage_prefix);

        let max_upload_bytes = match std::env::var("TWEET_MAX_UPLOAD_BYTES") {
            Ok(v) => v
                .parse::<usize>()
                .map_err(|_| ConfigError::Invalid("TWEET_MAX_UPLOAD_BYTES"))?,
            Err(_) => defaults.max_upload_bytes,
        };

        let draft_max_chars = match std::env::var("TWEET_DRAFT_MAX_CHARS") {
            Ok(v) => v
                .parse::<usize>()
                .map_err(|_| ConfigError::Invalid("TWEET_DRAFT_MAX_CHARS"))?,
            Err(_) => defaults.draft_max_chars,
        };

        let commit_failure_policy = match std::env::var("TWEET_COMMIT_FAILURE_POLICY") {
            Ok(v) => CommitFailurePolicy::parse(&v)
                .ok_or(ConfigError::Invalid("TWEET_COMMIT_FAILURE_POLICY"))?,
            Err(_) => defaults.commit_failure_policy,
        };

        Ok(Self {
            collection,
            storage_prefix,
            max_upload_bytes,
            draft_max_chars,
            commit_failure_policy,
        })
    }
}
