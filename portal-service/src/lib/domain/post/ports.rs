use async_trait::async_trait;

use crate::post::errors::PostError;
use crate::post::models::Post;

/// Source of posts, typically a remote HTTP API.
#[async_trait]
pub trait PostSource: Send + Sync + 'static {
    /// Fetch every post, in upstream order.
    ///
    /// # Errors
    /// * `UpstreamStatus` - Upstream answered with a non-success status
    /// * `Upstream` - Transport failure, timeout, or undecodable body
    async fn fetch_posts(&self) -> Result<Vec<Post>, PostError>;
}
