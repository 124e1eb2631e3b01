//! Creation domain model.
//!
//! A creation is one AI-generated image post in the feed. Creations are owned
//! by the server; the client holds read-only snapshots keyed by `id`, which is
//! globally unique and stable across pages. Wire format is camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// The generated image attached to a creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationImage {
    /// Server identifier of the image record.
    pub id: String,

    /// URL of the rendered image.
    pub url: String,

    /// Whether the image is premium-gated.
    #[serde(default)]
    pub is_premium: bool,

    /// The text prompt the image was generated from.
    #[serde(default)]
    pub prompt: String,
}

/// Author reference embedded in a creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBy {
    /// Server identifier of the author.
    pub id: String,

    /// Display name of the author.
    pub name: String,

    /// Avatar URL, when the author has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

/// One AI-generated image post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creation {
    /// Globally unique, stable identifier.
    pub id: String,

    /// When the creation was posted.
    pub created_at: DateTime<Utc>,

    /// Author of the creation.
    pub created_by: CreatedBy,

    /// Optional override image shown instead of the generated one.
    #[serde(default)]
    pub display_image: Option<String>,

    /// The generated image.
    pub image: CreationImage,

    /// Whether the authenticated user has liked this creation.
    ///
    /// Server truth at fetch time; optimistic local toggles are layered on
    /// top by [`LikeBook`](crate::app::LikeBook), never written back here.
    #[serde(default)]
    pub is_liked: bool,
}

impl Creation {
    /// The URL to display: the override when present, else the image itself.
    #[must_use]
    pub fn display_url(&self) -> &str {
        self.display_image.as_deref().unwrap_or(&self.image.url)
    }

    /// Returns a human-readable string describing how long ago this was posted.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - 1 day or more: "Xd ago"
    #[must_use]
    pub fn created_ago(&self) -> String {
        let diff = Utc::now().timestamp() - self.created_at.timestamp();

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creation(display_image: Option<&str>) -> Creation {
        Creation {
            id: "c1".into(),
            created_at: Utc::now(),
            created_by: CreatedBy { id: "u1".into(), name: "ada".into(), profile_url: None },
            display_image: display_image.map(String::from),
            image: CreationImage {
                id: "i1".into(),
                url: "https://img.example/i1.png".into(),
                is_premium: false,
                prompt: "a fox in watercolor".into(),
            },
            is_liked: false,
        }
    }

    #[test]
    fn display_url_prefers_override() {
        assert_eq!(creation(None).display_url(), "https://img.example/i1.png");
        assert_eq!(creation(Some("https://cdn/x.png")).display_url(), "https://cdn/x.png");
    }

    #[test]
    fn deserializes_camel_case_wire_format() {
        let json = r#"{
            "id": "abc",
            "createdAt": "2024-03-01T12:00:00Z",
            "createdBy": {"id": "u9", "name": "grace", "profileUrl": null},
            "displayImage": null,
            "image": {"id": "img", "url": "https://img/x.png", "isPremium": true, "prompt": "p"},
            "isLiked": true
        }"#;
        let parsed: Creation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.created_by.name, "grace");
        assert!(parsed.image.is_premium);
        assert!(parsed.is_liked);
    }

    #[test]
    fn created_ago_formats_recent_posts() {
        let mut c = creation(None);
        assert_eq!(c.created_ago(), "just now");
        c.created_at = Utc::now() - chrono::Duration::seconds(300);
        assert_eq!(c.created_ago(), "5m ago");
    }
}
