//! Comment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author reference embedded in a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    /// Server identifier of the author.
    pub id: String,

    /// Display name of the author.
    pub name: String,

    /// Avatar URL, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// One comment on a creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Server identifier.
    pub id: String,

    /// The comment text. The wire field is named `comment`.
    pub comment: String,

    /// When the comment was posted.
    pub created_at: DateTime<Utc>,

    /// Who posted it.
    pub user: CommentAuthor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_format() {
        let json = r#"{
            "id": "cm1",
            "comment": "love the palette",
            "createdAt": "2024-03-02T10:00:00Z",
            "user": {"id": "u2", "name": "mira"}
        }"#;
        let parsed: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.comment, "love the palette");
        assert!(parsed.user.avatar_url.is_none());
    }
}
