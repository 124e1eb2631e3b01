//! User and profile domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered handle belonging to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handle {
    /// The handle text, without the leading `@`.
    pub handle: String,
}

/// A user as returned by the combined search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Registered handles; the first one is shown in search results.
    #[serde(default)]
    pub handles: Vec<Handle>,

    /// Avatar URL, when set.
    #[serde(default)]
    pub profile_url: Option<String>,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The user's primary handle, when one is registered.
    #[must_use]
    pub fn primary_handle(&self) -> Option<&str> {
        self.handles.first().map(|h| h.handle.as_str())
    }
}

/// The authenticated user's own account, as returned by the profile endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    /// Server identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Account email.
    pub email: String,

    /// Registered handle, when set.
    #[serde(default)]
    pub handle: Option<String>,

    /// Avatar URL, when set.
    #[serde(default)]
    pub profile_url: Option<String>,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// Generation-token balance.
    #[serde(default)]
    pub tokens: i64,

    /// Premium-token balance.
    #[serde(default)]
    pub premium_tokens: i64,
}

/// Full profile payload: the account plus the user's own creations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The account itself.
    pub user: ProfileUser,

    /// The user's own creations, newest first.
    #[serde(default)]
    pub creations: Vec<super::Creation>,
}

/// Profile fields the client may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display name.
    pub name: String,

    /// New handle, when the user picked one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    /// New avatar URL, when the user uploaded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}
