//! Typed request builder for combined user/creation search.

use crate::api::client::ApiClient;
use crate::domain::error::Result;
use crate::domain::{Creation, User};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::Instrument;

/// Matching users and creations for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SearchResults {
    /// Users whose name or handle matched.
    #[serde(default)]
    pub users: Vec<User>,

    /// Creations whose prompt matched.
    #[serde(default)]
    pub creations: Vec<Creation>,
}

impl SearchResults {
    /// True when neither section has matches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.creations.is_empty()
    }
}

/// Server envelope around search results.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[allow(dead_code)]
    message: Option<String>,
    data: SearchResults,
}

/// Typed access to the search endpoint.
#[derive(Clone)]
pub struct SearchClient {
    api: Arc<ApiClient>,
}

impl SearchClient {
    /// Wraps an [`ApiClient`].
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Runs a combined user/creation search.
    ///
    /// Ranking is entirely server-side; results come back in server order.
    ///
    /// # Errors
    ///
    /// Propagates the mapped transport or server error after logging it.
    pub async fn search(&self, query: &str) -> Result<SearchResults> {
        let span = tracing::debug_span!("search", query_len = query.len());
        async move {
            let envelope: SearchEnvelope = self
                .api
                .get_json("/api/creations/search", &[("query", query.to_string())])
                .await
                .inspect_err(|e| {
                    tracing::debug!(error = %e, "search failed");
                })?;

            tracing::debug!(
                users = envelope.data.users.len(),
                creations = envelope.data.creations.len(),
                "search resolved"
            );
            Ok(envelope.data)
        }
        .instrument(span)
        .await
    }
}
