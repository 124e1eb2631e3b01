//! Typed request builders for creations, comments, likes, and generation.

use crate::api::client::ApiClient;
use crate::domain::error::Result;
use crate::domain::{Comment, Creation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::Instrument;

/// Comments fetched per page, matching the comment sheet's page size.
const COMMENTS_PAGE_SIZE: u32 = 10;

/// One page of feed creations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationPage {
    /// Creations in server page order.
    pub creations: Vec<Creation>,

    /// The page this response covers (1-based).
    pub current_page: u32,

    /// Total creations across all pages.
    #[serde(default)]
    pub total_creations: u64,

    /// Total page count.
    pub total_pages: u32,
}

/// One page of comments on a creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    /// Comments in server page order.
    pub comments: Vec<Comment>,

    /// Whether the server reports pages past this one.
    pub has_more: bool,

    /// The page this response covers (1-based).
    pub current_page: u32,

    /// Total page count.
    pub total_pages: u32,
}

impl CommentPage {
    /// The empty single-page result used when there is nothing to fetch.
    #[must_use]
    pub fn empty() -> Self {
        Self { comments: vec![], has_more: false, current_page: 1, total_pages: 1 }
    }
}

/// Server envelope around a newly posted comment.
#[derive(Debug, Deserialize)]
struct AddCommentResponse {
    comment: Comment,
}

/// Result of submitting a generation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCreation {
    /// URL of the generated image.
    pub image_url: String,

    /// Server status message.
    #[serde(default)]
    pub message: String,
}

/// Body for submitting a generation prompt.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NewCreationBody<'a> {
    prompt: &'a str,
    category: &'a str,
    is_premium: bool,
}

/// Typed access to the creations endpoints.
#[derive(Clone)]
pub struct ContentClient {
    api: Arc<ApiClient>,
}

impl ContentClient {
    /// Wraps an [`ApiClient`].
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Fetches one page of creations, optionally filtered by a search term.
    ///
    /// An empty or absent term returns the unfiltered feed.
    ///
    /// # Errors
    ///
    /// Propagates the mapped transport or server error after logging it.
    pub async fn get_creations(&self, page: u32, search: Option<&str>) -> Result<CreationPage> {
        let span = tracing::debug_span!("get_creations", page = page);
        async move {
            let mut query = vec![("page", page.to_string())];
            if let Some(term) = search.filter(|t| !t.trim().is_empty()) {
                query.push(("search", term.to_string()));
            }

            let page: CreationPage =
                self.api.get_json("/api/creations/get-creations", &query).await.inspect_err(
                    |e| {
                        tracing::debug!(error = %e, "failed to fetch creations");
                    },
                )?;

            tracing::debug!(
                count = page.creations.len(),
                current_page = page.current_page,
                total_pages = page.total_pages,
                "creations fetched"
            );
            Ok(page)
        }
        .instrument(span)
        .await
    }

    /// Fetches one page of comments for a creation.
    ///
    /// An empty `creation_id` short-circuits to [`CommentPage::empty`]
    /// without touching the network; the comment sheet opens before an id is
    /// always known.
    ///
    /// # Errors
    ///
    /// Propagates the mapped transport or server error after logging it.
    pub async fn get_comments(&self, creation_id: &str, page: u32) -> Result<CommentPage> {
        if creation_id.is_empty() {
            tracing::debug!("no creation id, returning empty comment page");
            return Ok(CommentPage::empty());
        }

        let span = tracing::debug_span!("get_comments", creation_id = %creation_id, page = page);
        async move {
            let query =
                vec![("page", page.to_string()), ("limit", COMMENTS_PAGE_SIZE.to_string())];
            let path = format!("/api/creations/{creation_id}/comments");

            let page: CommentPage = self.api.get_json(&path, &query).await.inspect_err(|e| {
                tracing::debug!(error = %e, "failed to fetch comments");
            })?;

            tracing::debug!(
                count = page.comments.len(),
                has_more = page.has_more,
                "comments fetched"
            );
            Ok(page)
        }
        .instrument(span)
        .await
    }

    /// Posts a comment on a creation and returns the stored comment.
    ///
    /// # Errors
    ///
    /// Propagates the mapped transport or server error after logging it.
    pub async fn add_comment(&self, creation_id: &str, text: &str) -> Result<Comment> {
        let span = tracing::debug_span!("add_comment", creation_id = %creation_id);
        async move {
            let path = format!("/api/creations/{creation_id}/comments");
            let body = serde_json::json!({ "text": text });

            let response: AddCommentResponse =
                self.api.post_json(&path, &body).await.inspect_err(|e| {
                    tracing::debug!(error = %e, "failed to add comment");
                })?;

            tracing::debug!(comment_id = %response.comment.id, "comment added");
            Ok(response.comment)
        }
        .instrument(span)
        .await
    }

    /// Toggles the like state of a creation on the server.
    ///
    /// Fire-and-forget: the server flips and owns the final like state; the
    /// client's optimistic view lives in [`LikeBook`](crate::app::LikeBook).
    ///
    /// # Errors
    ///
    /// Propagates the mapped transport or server error after logging it.
    pub async fn like_creation(&self, creation_id: &str) -> Result<()> {
        let span = tracing::debug_span!("like_creation", creation_id = %creation_id);
        async move {
            let path = format!("/api/creations/{creation_id}/like");
            self.api.post_empty(&path).await.inspect_err(|e| {
                tracing::debug!(error = %e, "failed to toggle like");
            })?;

            tracing::debug!("like toggled");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Submits a generation prompt and returns the generated image URL.
    ///
    /// # Errors
    ///
    /// Propagates the mapped transport or server error; generation failures
    /// are surfaced to the user by callers.
    pub async fn generate_creation(
        &self,
        prompt: &str,
        category: &str,
        is_premium: bool,
    ) -> Result<NewCreation> {
        let span = tracing::debug_span!("generate_creation", category = category);
        async move {
            let body = NewCreationBody { prompt, category, is_premium };
            let created: NewCreation = self
                .api
                .post_json("/api/creations/new-creation", &body)
                .await
                .inspect_err(|e| {
                    tracing::debug!(error = %e, "generation failed");
                })?;

            tracing::debug!(image_url = %created.image_url, "creation generated");
            Ok(created)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::RetryPolicy;
    use crate::storage::MemoryCredentialStore;

    fn offline_client() -> ContentClient {
        // Unroutable base URL: any attempted request would fail, so a passing
        // call proves no network was touched.
        let api = Arc::new(ApiClient::new(
            "http://127.0.0.1:1",
            Arc::new(MemoryCredentialStore::new()),
            RetryPolicy { attempts: 0, base_delay: std::time::Duration::from_millis(1) },
        ));
        ContentClient::new(api)
    }

    #[tokio::test]
    async fn empty_creation_id_short_circuits_without_network() {
        let client = offline_client();
        let page = client.get_comments("", 1).await.unwrap();
        assert_eq!(page, CommentPage::empty());
        assert!(page.comments.is_empty());
        assert!(!page.has_more);
        assert_eq!((page.current_page, page.total_pages), (1, 1));
    }

    #[test]
    fn creation_page_parses_wire_shape() {
        let json = r#"{
            "creations": [],
            "currentPage": 2,
            "totalCreations": 57,
            "totalPages": 6
        }"#;
        let page: CreationPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 6);
        assert_eq!(page.total_creations, 57);
    }

    #[test]
    fn new_creation_body_serializes_camel_case() {
        let body = NewCreationBody { prompt: "p", category: "art", is_premium: true };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"prompt": "p", "category": "art", "isPremium": true})
        );
    }
}
