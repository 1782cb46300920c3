use serde::{Deserialize, Serialize};

/// A post document as stored in the `posts` collection.
///
/// Field names follow the stored document (`createdAt`, `imageUrl`, ...). Everything the
/// composer does not always write is optional, documents written by older clients may
/// lack those fields entirely.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub uid: String,
    pub email: String,
    pub content: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
}

impl Post {
    /// The attached image, if any. An empty `imageUrl` means "no image".
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn hashtags(&self) -> &[String] {
        self.hashtags.as_deref().unwrap_or_default()
    }

    pub fn comments(&self) -> &[Comment] {
        self.comments.as_deref().unwrap_or_default()
    }

    pub fn path(&self) -> String {
        format!("posts/{}", self.id)
    }
}

/// The document the post composer writes. The backend assigns the id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub content: String,
    pub created_at: String,
    pub uid: String,
    pub email: String,
    pub hashtags: Vec<String>,
    pub image_url: String,
}

impl CreatePost {
    pub fn into_post(self, id: String) -> Post {
        Post {
            id,
            uid: self.uid,
            email: self.email,
            content: self.content,
            created_at: self.created_at,
            image_url: Some(self.image_url),
            hashtags: Some(self.hashtags),
            ..Default::default()
        }
    }
}

/// A comment embedded in its post's `comments` array. It has no identity of its own.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub comment: String,
    pub uid: String,
    pub email: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_documents() {
        let post: Post = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "uid": "u1",
            "email": "u1@example.com",
            "content": "hi",
            "createdAt": "2024. 1. 5. 오후 03:04:05",
        }))
        .unwrap();

        assert!(post.hashtags().is_empty());
        assert!(post.comments().is_empty());
        assert_eq!(post.image(), None);
        assert_eq!(post.path(), "posts/p1");
    }

    #[test]
    fn empty_image_url_is_no_image() {
        let post = CreatePost {
            content: "hi".into(),
            created_at: "now".into(),
            uid: "u1".into(),
            email: "u1@example.com".into(),
            hashtags: vec!["rust".into()],
            image_url: String::new(),
        }
        .into_post("p1".into());

        assert_eq!(post.image(), None);
        assert_eq!(post.hashtags(), ["rust".to_string()]);

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["imageUrl"], "");
        assert!(json.get("likes").is_none());
    }
}
