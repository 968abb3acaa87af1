//! Post types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::merge_str;
use crate::{AccountId, ParseIdError};

/// Unique post identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl PostId {
    /// Parse a post ID from a path segment
    pub fn parse(s: &str) -> Result<Self, ParseIdError> {
        s.parse::<i64>().map(Self).map_err(|_| ParseIdError {
            kind: "post",
            value: s.to_string(),
        })
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Post record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "update_at")]
    pub updated_at: DateTime<Utc>,
    pub user_id: AccountId,
    pub content: String,
    pub likes: i64,
}

/// Input for post creation; the owner comes from the path, not the body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewPost {
    pub content: String,
    pub likes: i64,
}

/// Partial update for a post
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostChanges {
    pub content: String,
    pub likes: i64,
}

impl PostChanges {
    /// Apply non-empty content and non-zero likes onto an existing post
    pub fn merge_into(self, post: &mut Post) {
        merge_str(&mut post.content, self.content);
        if self.likes != 0 {
            post.likes = self.likes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_likes_leaves_count() {
        let mut post = Post {
            id: PostId(1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            user_id: AccountId(3),
            content: "first".into(),
            likes: 5,
        };

        PostChanges {
            content: String::new(),
            likes: 0,
        }
        .merge_into(&mut post);
        assert_eq!(post.content, "first");
        assert_eq!(post.likes, 5);

        PostChanges {
            content: "edited".into(),
            likes: 9,
        }
        .merge_into(&mut post);
        assert_eq!(post.content, "edited");
        assert_eq!(post.likes, 9);
    }

    #[test]
    fn test_changes_accept_partial_json() {
        let changes: PostChanges = serde_json::from_str(r#"{"likes": 2}"#).unwrap();
        assert_eq!(changes.likes, 2);
        assert!(changes.content.is_empty());
    }
}
