//! Hub request/response messages.
//!
//! A hub exposes a single endpoint. Every call is a [`RequestObject`] carrying
//! one or more interface messages; the hub answers with a [`ResponseObject`]
//! holding one reply per message, in order. Stored objects travel as
//! unpadded base64url strings.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::envelope::JWT_VC_FORMAT;
use crate::error::CoreError;

/// Interface method returning every object in the hub's collection.
pub const COLLECTIONS_QUERY: &str = "CollectionsQuery";
/// Interface method appending one object to the hub's collection.
pub const COLLECTIONS_WRITE: &str = "CollectionsWrite";

/// Outcome of a request or of a single message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStatus {
    pub code: u16,
    pub detail: String,
}

impl RequestStatus {
    pub fn ok() -> Self {
        Self {
            code: 200,
            detail: "The request was successfully processed".into(),
        }
    }

    pub fn malformed_message() -> Self {
        Self {
            code: 400,
            detail: "The request could not be processed correctly".into(),
        }
    }

    pub fn not_implemented() -> Self {
        Self {
            code: 501,
            detail: "The interface method is not implemented".into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == 200
    }
}

/// Describes the interface method a message invokes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Descriptor {
    pub method: String,
    pub nonce: String,
    /// Seconds since the Unix epoch.
    pub date_created: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_format: Option<String>,
}

impl Descriptor {
    fn new(method: &str, data_format: Option<&str>) -> Self {
        Self {
            method: method.to_string(),
            nonce: Uuid::now_v7().to_string(),
            date_created: Utc::now().timestamp(),
            data_format: data_format.map(str::to_string),
        }
    }
}

/// One interface message inside a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRequestObject {
    pub descriptor: Descriptor,
    /// Base64url object payload, only present on writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl MessageRequestObject {
    /// Decode the attached payload.
    pub fn decoded_data(&self) -> Result<Vec<u8>, CoreError> {
        let data = self
            .data
            .as_deref()
            .ok_or_else(|| CoreError::MissingField("data".into()))?;
        decode_entry(data)
    }
}

/// A hub request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestObject {
    pub request_id: String,
    /// DID the request is addressed to, when the caller knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub messages: Vec<MessageRequestObject>,
}

impl RequestObject {
    fn single(message: MessageRequestObject) -> Self {
        Self {
            request_id: Uuid::now_v7().to_string(),
            target: None,
            messages: vec![message],
        }
    }

    /// Request listing every stored credential.
    pub fn collections_query() -> Self {
        Self::single(MessageRequestObject {
            descriptor: Descriptor::new(COLLECTIONS_QUERY, None),
            data: None,
        })
    }

    /// Request storing one JWT credential envelope.
    pub fn collections_write(envelope: &[u8]) -> Self {
        Self::single(MessageRequestObject {
            descriptor: Descriptor::new(COLLECTIONS_WRITE, Some(JWT_VC_FORMAT)),
            data: Some(encode_entry(envelope)),
        })
    }
}

/// Reply to one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponseObject {
    /// Nonce of the message being answered.
    pub message_id: String,
    pub status: RequestStatus,
    #[serde(default)]
    pub entries: Vec<String>,
}

impl MessageResponseObject {
    /// Decode every entry, failing on the first invalid one.
    pub fn decoded_entries(&self) -> Result<Vec<Vec<u8>>, CoreError> {
        self.entries.iter().map(|e| decode_entry(e)).collect()
    }
}

/// A hub response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseObject {
    pub request_id: String,
    pub status: RequestStatus,
    #[serde(default)]
    pub replies: Vec<MessageResponseObject>,
}

/// Encode a stored object for transport.
pub fn encode_entry(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a transported object.
pub fn decode_entry(entry: &str) -> Result<Vec<u8>, CoreError> {
    URL_SAFE_NO_PAD
        .decode(entry)
        .map_err(|e| CoreError::InvalidEncoding(e.to_string()))
}
