//! Boundary shapes exchanged with the remote service.
//!
//! Field names are fixed by the service and must not change:
//!
//! | Type | Direction | Shape |
//! |------|-----------|-------|
//! | [`MessageRecord`] | inbound | `{id, disparo_id, categoria, conteudo, midiaExtension?, midiaBase64?}` |
//! | [`UpdatePayload`] | outbound | `{disparo_id, mensagens: [{id, categoria, midiaExtension, midiaBase64, messageText}]}` |
//! | [`CreatePayload`] | outbound | `{disparo_id, mensagens: [{id, categoria, conteudo}]}` |
//! | [`DispatchPayload`] | outbound | `{disparo_id, data: [row, ...]}` |
//! | [`DispatchOutcome`] | inbound | `{status, ...}` |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SyncError};
use crate::message::{Message, MessageGroup};

/// A flat message record as returned by the "fetch messages" endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: u64,
    pub disparo_id: u64,
    pub categoria: String,

    /// Raw content: plain text or a JSON envelope, see
    /// [`Content::parse`](crate::core::content::Content::parse).
    #[serde(default)]
    pub conteudo: String,

    #[serde(rename = "midiaExtension", default, skip_serializing_if = "Option::is_none")]
    pub midia_extension: Option<String>,

    #[serde(rename = "midiaBase64", default, skip_serializing_if = "Option::is_none")]
    pub midia_base64: Option<String>,
}

impl MessageRecord {
    pub fn new(
        id: u64,
        disparo_id: u64,
        categoria: impl Into<String>,
        conteudo: impl Into<String>,
    ) -> Self {
        Self {
            id,
            disparo_id,
            categoria: categoria.into(),
            conteudo: conteudo.into(),
            midia_extension: None,
            midia_base64: None,
        }
    }
}

/// Parses a JSON array of flat records.
pub fn parse_records(json: &str) -> Result<Vec<MessageRecord>> {
    serde_json::from_str(json).map_err(|e| SyncError::json("message records", e))
}

/// One changed message in an update request.
///
/// Media fields serialize as `null` rather than being omitted; the service
/// reads `null` as "no attachment".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageUpdate {
    pub id: u64,
    pub categoria: String,
    #[serde(rename = "midiaExtension")]
    pub midia_extension: Option<String>,
    #[serde(rename = "midiaBase64")]
    pub midia_base64: Option<String>,
    #[serde(rename = "messageText")]
    pub message_text: String,
}

impl From<&Message> for MessageUpdate {
    fn from(msg: &Message) -> Self {
        Self {
            id: msg.id,
            categoria: msg.categoria.clone(),
            midia_extension: msg.media_extension.clone(),
            midia_base64: msg.media_payload.clone(),
            message_text: msg.conteudo.clone(),
        }
    }
}

/// Body of the "update messages" request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePayload {
    pub disparo_id: u64,
    pub mensagens: Vec<MessageUpdate>,
}

/// One message in a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub id: u64,
    pub categoria: String,
    pub conteudo: String,
}

/// Body of the "create group" request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePayload {
    pub disparo_id: u64,
    pub mensagens: Vec<NewMessage>,
}

impl From<&MessageGroup> for CreatePayload {
    fn from(group: &MessageGroup) -> Self {
        Self {
            disparo_id: group.disparo_id,
            mensagens: group
                .mensagens
                .iter()
                .map(|m| NewMessage {
                    id: m.id,
                    categoria: m.categoria.clone(),
                    conteudo: m.conteudo.clone(),
                })
                .collect(),
        }
    }
}

/// Returns `true` if a create response acknowledges the new group.
///
/// The service answers with an array whose first element carries a truthy
/// `success` field.
pub fn is_create_acknowledged(response: &Value) -> bool {
    response
        .as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get("success"))
        .is_some_and(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A spreadsheet row, passed through untouched as one recipient.
pub type SpreadsheetRow = Map<String, Value>;

/// Body of the "dispatch" request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchPayload {
    pub disparo_id: u64,
    pub data: Vec<SpreadsheetRow>,
}

impl DispatchPayload {
    /// Builds the payload, rejecting an empty recipient list.
    pub fn new(disparo_id: u64, data: Vec<SpreadsheetRow>) -> Result<Self> {
        if data.is_empty() {
            return Err(SyncError::invalid_input(
                "no spreadsheet rows were loaded for dispatch",
            ));
        }
        Ok(Self { disparo_id, data })
    }
}

/// Per-row result of a dispatch. Only `status` is inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DispatchOutcome {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            extra: Map::new(),
        }
    }
}
