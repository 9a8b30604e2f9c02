use thiserror::Error;

/// Error fetching posts from the upstream API
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostError {
    #[error("Posts API answered with status {0}")]
    UpstreamStatus(u16),

    #[error("Posts API request failed: {0}")]
    Upstream(String),
}
