//! Canonical message and group types.
//!
//! A [`MessageGroup`] is one dispatch template: every message in it shares the
//! same `disparo_id` and targets one recipient category. Groups are produced
//! by [`normalize`](crate::core::normalize::normalize) from the records the
//! remote service returns, or built from scratch by
//! [`GroupBuilder`](crate::core::create::GroupBuilder).
//!
//! # Example
//!
//! ```
//! use disparo::{Message, MessageGroup};
//!
//! let group = MessageGroup::new(3, vec![
//!     Message::new(31, "Estudante", "Hello!"),
//!     Message::new(32, "Visitante", "Welcome!").with_media(".png", "Zm9v"),
//! ]);
//!
//! assert_eq!(group.len(), 2);
//! assert!(group.mensagens[1].has_media());
//! ```
//!
//! # Serialization
//!
//! Field names follow the remote service (`disparo_id`, `midiaExtension`,
//! `midiaBase64`); media fields are omitted when absent.
//!
//! ```
//! use disparo::Message;
//!
//! let json = serde_json::to_string(&Message::new(1, "Estudante", "Oi"))?;
//! assert_eq!(json, r#"{"id":1,"categoria":"Estudante","conteudo":"Oi"}"#);
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};

/// One message of a group: a category label and the text sent to recipients
/// of that category, with an optional attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Identifier assigned by the remote service, unique across groups.
    pub id: u64,

    /// Recipient category this message targets.
    pub categoria: String,

    /// Message text, already unwrapped from any JSON envelope.
    #[serde(default)]
    pub conteudo: String,

    /// Attachment extension including the leading dot (e.g. `.png`).
    #[serde(rename = "midiaExtension", skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub media_extension: Option<String>,

    /// Attachment body as headerless base64.
    #[serde(rename = "midiaBase64", skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub media_payload: Option<String>,
}

impl Message {
    /// Creates a message without an attachment.
    pub fn new(id: u64, categoria: impl Into<String>, conteudo: impl Into<String>) -> Self {
        Self {
            id,
            categoria: categoria.into(),
            conteudo: conteudo.into(),
            media_extension: None,
            media_payload: None,
        }
    }

    /// Sets the attachment extension and base64 body.
    #[must_use]
    pub fn with_media(mut self, extension: impl Into<String>, payload: impl Into<String>) -> Self {
        self.media_extension = Some(extension.into());
        self.media_payload = Some(payload.into());
        self
    }

    /// Returns `true` if the message carries an attachment body.
    pub fn has_media(&self) -> bool {
        self.media_payload.is_some()
    }

    /// Returns `true` if any synchronized field differs from `other`.
    ///
    /// The id is not compared; callers match messages by id first.
    pub fn differs_from(&self, other: &Message) -> bool {
        self.conteudo != other.conteudo
            || self.categoria != other.categoria
            || self.media_extension != other.media_extension
            || self.media_payload != other.media_payload
    }
}

/// All messages that share one `disparo_id`, ordered by ascending id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageGroup {
    /// Grouping key shared by every message in the group.
    pub disparo_id: u64,

    /// Messages in ascending id order.
    pub mensagens: Vec<Message>,
}

impl MessageGroup {
    pub fn new(disparo_id: u64, mensagens: Vec<Message>) -> Self {
        Self {
            disparo_id,
            mensagens,
        }
    }

    pub fn len(&self) -> usize {
        self.mensagens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mensagens.is_empty()
    }

    /// Finds a message by id.
    pub fn message(&self, id: u64) -> Option<&Message> {
        self.mensagens.iter().find(|m| m.id == id)
    }

    /// Finds a message by id for editing.
    pub fn message_mut(&mut self, id: u64) -> Option<&mut Message> {
        self.mensagens.iter_mut().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_new() {
        let msg = Message::new(1, "Estudante", "Oi");
        assert_eq!(msg.id, 1);
        assert_eq!(msg.categoria, "Estudante");
        assert_eq!(msg.conteudo, "Oi");
        assert!(!msg.has_media());
    }

    #[test]
    fn test_with_media() {
        let msg = Message::new(1, "Estudante", "Oi").with_media(".pdf", "JVBERi0=");
        assert_eq!(msg.media_extension.as_deref(), Some(".pdf"));
        assert_eq!(msg.media_payload.as_deref(), Some("JVBERi0="));
        assert!(msg.has_media());
    }

    #[test]
    fn test_differs_from() {
        let base = Message::new(1, "Estudante", "Oi");
        assert!(!base.differs_from(&base.clone()));

        let mut text = base.clone();
        text.conteudo = "Olá".into();
        assert!(text.differs_from(&base));

        let mut category = base.clone();
        category.categoria = "Visitante".into();
        assert!(category.differs_from(&base));

        let media = base.clone().with_media(".png", "Zm9v");
        assert!(media.differs_from(&base));

        let mut only_ext = base.clone();
        only_ext.media_extension = Some(".png".into());
        assert!(only_ext.differs_from(&base));
    }

    #[test]
    fn test_differs_ignores_id() {
        let a = Message::new(1, "Estudante", "Oi");
        let b = Message::new(2, "Estudante", "Oi");
        assert!(!a.differs_from(&b));
    }

    #[test]
    fn test_serialize_with_media() {
        let msg = Message::new(5, "Visitante", "Hi").with_media(".gif", "R0lG");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""midiaExtension":".gif""#));
        assert!(json.contains(r#""midiaBase64":"R0lG""#));
    }

    #[test]
    fn test_deserialize_group() {
        let json = r#"{"disparo_id": 4, "mensagens": [
            {"id": 41, "categoria": "Estudante", "conteudo": "a"},
            {"id": 42, "categoria": "Visitante"}
        ]}"#;
        let group: MessageGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.disparo_id, 4);
        assert_eq!(group.len(), 2);
        assert_eq!(group.mensagens[1].conteudo, "");
    }

    #[test]
    fn test_message_lookup() {
        let mut group = MessageGroup::new(
            1,
            vec![Message::new(10, "A", "x"), Message::new(11, "B", "y")],
        );
        assert_eq!(group.message(11).map(|m| m.conteudo.as_str()), Some("y"));
        assert!(group.message(12).is_none());

        if let Some(msg) = group.message_mut(10) {
            msg.conteudo = "changed".into();
        }
        assert_eq!(group.mensagens[0].conteudo, "changed");
    }
}
