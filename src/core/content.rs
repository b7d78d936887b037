//! Interpretation of a record's raw `conteudo` field.
//!
//! The remote service stores either plain text or a JSON array holding a
//! single envelope object:
//!
//! ```text
//! [{"messageText": "Hi!", "midiaExtension": ".png", "midiaBase64": "iVBOR..."}]
//! ```
//!
//! Parsing is lenient. Anything that does not decode as a non-empty array, or
//! whose first element is `null`, is kept verbatim as plain text, so one bad
//! record never fails a batch. A first element that is some other non-object
//! value carries no fields and yields an empty envelope.
//!
//! # Example
//!
//! ```
//! use disparo::core::content::{Content, ParsedContent};
//!
//! let parsed = ParsedContent::parse(r#"[{"messageText":"hi","midiaExtension":".png","midiaBase64":"Zm9v"}]"#);
//! assert_eq!(parsed.text, "hi");
//! assert_eq!(parsed.media_extension.as_deref(), Some(".png"));
//!
//! assert_eq!(Content::parse("[not valid json"), Content::PlainText("[not valid json".into()));
//! ```

use serde_json::{Map, Value, json};

/// The body of a structured `conteudo` value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Envelope {
    pub text: String,
    pub media_extension: Option<String>,
    pub media_payload: Option<String>,
}

/// Result of interpreting a raw `conteudo` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// A JSON array whose first element supplied text and media.
    StructuredEnvelope(Envelope),
    /// Anything else, kept exactly as received.
    PlainText(String),
}

impl Content {
    /// Interprets `raw`, falling back to [`Content::PlainText`] on any
    /// decoding problem.
    pub fn parse(raw: &str) -> Self {
        if !raw.trim().starts_with('[') {
            return Content::PlainText(raw.to_string());
        }

        match serde_json::from_str::<Vec<Value>>(raw) {
            Ok(items) => match items.first() {
                Some(Value::Object(first)) => Content::StructuredEnvelope(envelope_from(first)),
                Some(Value::Null) => {
                    tracing::warn!("content envelope element is null; keeping raw text");
                    Content::PlainText(raw.to_string())
                }
                Some(other) => {
                    tracing::debug!(
                        kind = value_kind(other),
                        "content envelope element has no fields; using an empty envelope"
                    );
                    Content::StructuredEnvelope(Envelope::default())
                }
                None => {
                    tracing::warn!("content envelope is an empty array; keeping raw text");
                    Content::PlainText(raw.to_string())
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "content looks like an envelope but is not valid JSON; keeping raw text");
                Content::PlainText(raw.to_string())
            }
        }
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        match self {
            Content::StructuredEnvelope(env) => &env.text,
            Content::PlainText(text) => text,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Content::StructuredEnvelope(_))
    }

    /// Rebuilds the raw `conteudo` form.
    ///
    /// Envelopes are written back as a one-element array; absent media fields
    /// are left out.
    pub fn to_raw(&self) -> String {
        match self {
            Content::PlainText(text) => text.clone(),
            Content::StructuredEnvelope(env) => {
                let mut object = Map::new();
                object.insert("messageText".into(), json!(env.text));
                if let Some(ext) = &env.media_extension {
                    object.insert("midiaExtension".into(), json!(ext));
                }
                if let Some(payload) = &env.media_payload {
                    object.insert("midiaBase64".into(), json!(payload));
                }
                Value::Array(vec![Value::Object(object)]).to_string()
            }
        }
    }
}

/// Flat view of a [`Content`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedContent {
    pub text: String,
    pub media_extension: Option<String>,
    pub media_payload: Option<String>,
}

impl ParsedContent {
    /// Shorthand for `Content::parse(raw).into()`.
    pub fn parse(raw: &str) -> Self {
        Content::parse(raw).into()
    }
}

impl From<Content> for ParsedContent {
    fn from(content: Content) -> Self {
        match content {
            Content::StructuredEnvelope(env) => Self {
                text: env.text,
                media_extension: env.media_extension,
                media_payload: env.media_payload,
            },
            Content::PlainText(text) => Self {
                text,
                media_extension: None,
                media_payload: None,
            },
        }
    }
}

fn envelope_from(object: &Map<String, Value>) -> Envelope {
    // A missing or null messageText becomes empty; other scalars keep their
    // JSON rendering.
    let text = match object.get("messageText") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    Envelope {
        text,
        media_extension: string_field(object, "midiaExtension"),
        media_payload: string_field(object, "midiaBase64"),
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(ToString::to_string)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
