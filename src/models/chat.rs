use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

// ---------------------------------------------------------------------------
// ChatMessage — One entry of the chat log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: MessageBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum MessageBody {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(
            default,
            rename = "imageBase64",
            skip_serializing_if = "Option::is_none"
        )]
        image_base64: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl ChatMessage {
    fn with_body(body: MessageBody) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            body,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_body(MessageBody::System {
            content: content.into(),
        })
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::with_body(MessageBody::User {
            content: content.into(),
        })
    }

    pub fn assistant_text(content: impl Into<String>) -> Self {
        Self::with_body(MessageBody::Assistant {
            content: Some(content.into()),
            image_base64: None,
        })
    }

    pub fn assistant_image(caption: impl Into<String>, image_base64: impl Into<String>) -> Self {
        Self::with_body(MessageBody::Assistant {
            content: Some(caption.into()),
            image_base64: Some(image_base64.into()),
        })
    }

    pub fn role(&self) -> Role {
        match self.body {
            MessageBody::System { .. } => Role::System,
            MessageBody::User { .. } => Role::User,
            MessageBody::Assistant { .. } => Role::Assistant,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match &self.body {
            MessageBody::System { content } | MessageBody::User { content } => Some(content),
            MessageBody::Assistant { content, .. } => content.as_deref(),
        }
    }

    pub fn image_base64(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Assistant { image_base64, .. } => image_base64.as_deref(),
            _ => None,
        }
    }

    /// Decode the attached image, if any.
    pub fn image_bytes(&self) -> Result<Option<Vec<u8>>> {
        match self.image_base64() {
            Some(encoded) => Ok(Some(STANDARD.decode(encoded.trim())?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_are_unique() {
        let a = ChatMessage::user("hi");
        let b = ChatMessage::user("hi");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serializes_role_tag_and_camel_case_image() {
        let msg = ChatMessage::assistant_image("Here", "aGk=");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["imageBase64"], "aGk=");
        assert_eq!(value["content"], "Here");

        let back: ChatMessage = serde_json::from_value(value).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn text_only_assistant_omits_image_field() {
        let value = serde_json::to_value(ChatMessage::assistant_text("no")).unwrap();
        assert!(value.get("imageBase64").is_none());
        let id = value["id"].clone();
        let created_at = value["createdAt"].clone();
        assert_eq!(
            value,
            json!({"id": id, "createdAt": created_at, "role": "assistant", "content": "no"})
        );
    }

    #[test]
    fn image_bytes_decodes_payload() {
        let msg = ChatMessage::assistant_image("c", STANDARD.encode(b"\x89PNG"));
        assert_eq!(msg.image_bytes().unwrap().unwrap(), b"\x89PNG");
        assert!(ChatMessage::user("x").image_bytes().unwrap().is_none());
        assert!(ChatMessage::assistant_image("c", "%%%").image_bytes().is_err());
    }

    #[test]
    fn accessors_follow_variant() {
        assert_eq!(ChatMessage::system("s").role(), Role::System);
        assert_eq!(ChatMessage::user("u").content(), Some("u"));
        assert_eq!(ChatMessage::user("u").image_base64(), None);
    }
}
