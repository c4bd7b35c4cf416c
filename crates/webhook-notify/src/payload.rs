use serde::{Deserialize, Serialize};

use crate::fields::FieldSet;

const MESSAGE_TYPE: &str = "message";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Outer JSON structure expected by the receiving webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(
        rename = "contentType",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub content_type: String,
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub kind: String,
    pub body: Vec<FieldSet>,
}

impl Envelope {
    /// Wrap `fields` as the single body entry of a single attachment.
    pub fn new(fields: FieldSet) -> Self {
        Self {
            kind: MESSAGE_TYPE.to_string(),
            attachments: vec![Attachment {
                content_type: JSON_CONTENT_TYPE.to_string(),
                content: Content {
                    kind: JSON_CONTENT_TYPE.to_string(),
                    body: vec![fields],
                },
            }],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
