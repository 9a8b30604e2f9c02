use std::time::Duration;

use async_trait::async_trait;

use crate::domain::post::models::Post;
use crate::domain::post::ports::PostSource;
use crate::post::errors::PostError;

/// Fetches posts from a JSON HTTP endpoint. One attempt per call, no retries.
pub struct HttpPostSource {
    client: reqwest::Client,
    url: String,
}

impl HttpPostSource {
    /// # Arguments
    /// * `url` - Endpoint returning a JSON array of posts
    /// * `timeout` - Whole-request timeout
    ///
    /// # Errors
    /// * `reqwest::Error` - HTTP client could not be built (TLS backend init)
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>, PostError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PostError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = status.as_u16(), "Posts API returned an error status");
            return Err(PostError::UpstreamStatus(status.as_u16()));
        }

        response
            .json::<Vec<Post>>()
            .await
            .map_err(|e| PostError::Upstream(e.to_string()))
    }
}
