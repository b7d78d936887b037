//! Attachment validation and base64 transport encoding.
//!
//! Attachments travel inside JSON as headerless base64 (`midiaBase64`) next
//! to their file extension (`midiaExtension`). [`MediaCodec`] enforces the
//! accepted media types and size limit from [`MediaConfig`] before anything
//! is encoded.
//!
//! # Example
//!
//! ```
//! use disparo::core::media::{MediaCodec, MediaFile};
//! use disparo::Message;
//!
//! let codec = MediaCodec::new();
//! let file = MediaFile::new("Flyer.PNG", "image/png", vec![0x89, 0x50, 0x4e, 0x47]);
//!
//! let mut msg = Message::new(1, "Estudante", "See attached");
//! codec.attach(&mut msg, &file)?;
//!
//! assert_eq!(msg.media_extension.as_deref(), Some(".PNG"));
//! assert_eq!(codec.decode(msg.media_payload.as_deref().unwrap_or_default())?, file.bytes);
//! # Ok::<(), disparo::SyncError>(())
//! ```

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

use crate::Message;
use crate::config::MediaConfig;
use crate::error::{Result, SyncError};

static DATA_URI_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:[^,]*;base64,").expect("data URI header pattern is valid")
});

/// A file picked for attachment: its name, declared media type and contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Validates, encodes and decodes attachments.
#[derive(Debug, Clone, Default)]
pub struct MediaCodec {
    config: MediaConfig,
}

impl MediaCodec {
    /// Creates a codec with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MediaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    /// Checks the declared media type, then the size.
    pub fn validate(&self, file: &MediaFile) -> Result<()> {
        if !self.config.is_allowed_type(&file.mime) {
            return Err(SyncError::unsupported_media(
                &file.mime,
                &self.config.allowed_types,
            ));
        }
        if file.size() > self.config.max_size_bytes {
            return Err(SyncError::oversized_media(
                self.config.max_size_bytes,
                file.size(),
            ));
        }
        Ok(())
    }

    /// Encodes raw bytes as headerless standard base64.
    pub fn encode(&self, bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    /// Decodes a base64 payload, tolerating a leading data-URI header.
    pub fn decode(&self, payload: &str) -> Result<Vec<u8>> {
        Ok(STANDARD.decode(strip_data_uri(payload.trim()))?)
    }

    /// Validates `file` and stores it on `message`.
    ///
    /// On rejection the message is left untouched.
    pub fn attach(&self, message: &mut Message, file: &MediaFile) -> Result<()> {
        if let Err(e) = self.validate(file) {
            tracing::warn!(
                message_id = message.id,
                file = %file.name,
                error = %e,
                "attachment rejected"
            );
            return Err(e);
        }

        message.media_extension = Some(extension_of(&file.name));
        message.media_payload = Some(self.encode(&file.bytes));
        tracing::debug!(message_id = message.id, size = file.size(), "attachment set");
        Ok(())
    }

    /// Removes any attachment from `message`.
    pub fn detach(&self, message: &mut Message) {
        message.media_extension = None;
        message.media_payload = None;
    }
}

/// Returns the extension of `file_name` with a leading dot, case preserved.
///
/// The extension is everything after the last `.`. A name without a dot is
/// taken whole, so `"README"` gives `".README"`.
pub fn extension_of(file_name: &str) -> String {
    let ext = file_name.rsplit('.').next().unwrap_or(file_name);
    format!(".{ext}")
}

/// Removes a `data:<mime>;base64,` header, if present.
pub fn strip_data_uri(text: &str) -> &str {
    match DATA_URI_HEADER.find(text) {
        Some(header) => &text[header.end()..],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(mime: &str, size: usize) -> MediaFile {
        MediaFile::new("file.bin", mime, vec![0u8; size])
    }

    #[test]
    fn test_validate_rejects_oversized_png() {
        let codec = MediaCodec::new();
        let err = codec.validate(&file("image/png", 11 * 1024 * 1024)).unwrap_err();
        assert!(matches!(
            err,
            SyncError::OversizedMedia {
                max_size: 10485760,
                actual_size: 11534336
            }
        ));
    }

    #[test]
    fn test_validate_accepts_small_pdf() {
        let codec = MediaCodec::new();
        assert!(codec.validate(&file("application/pdf", 1024)).is_ok());
    }

    #[test]
    fn test_validate_size_boundary() {
        let codec = MediaCodec::new();
        assert!(codec.validate(&file("video/mp4", 10 * 1024 * 1024)).is_ok());
        assert!(codec.validate(&file("video/mp4", 10 * 1024 * 1024 + 1)).is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_type() {
        let codec = MediaCodec::new();
        let err = codec.validate(&file("text/plain", 10)).unwrap_err();
        assert!(matches!(err, SyncError::UnsupportedMedia { ref mime, .. } if mime == "text/plain"));
    }

    #[test]
    fn test_validate_checks_type_before_size() {
        let codec = MediaCodec::new();
        let err = codec.validate(&file("image/bmp", 20 * 1024 * 1024)).unwrap_err();
        assert!(matches!(err, SyncError::UnsupportedMedia { .. }));
    }

    #[test]
    fn test_custom_config() {
        let codec = MediaCodec::with_config(
            MediaConfig::new()
                .with_allowed_types(["image/png"])
                .with_max_size_bytes(4),
        );
        assert!(codec.validate(&file("image/png", 4)).is_ok());
        assert!(codec.validate(&file("image/png", 5)).is_err());
        assert!(codec.validate(&file("application/pdf", 1)).is_err());
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let codec = MediaCodec::new();
        let bytes: Vec<u8> = (0..=255).collect();
        let encoded = codec.encode(&bytes);
        assert!(!encoded.starts_with("data:"));
        assert_eq!(codec.decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn test_encode_known_value() {
        assert_eq!(MediaCodec::new().encode(b"foo"), "Zm9v");
    }

    #[test]
    fn test_decode_strips_data_uri() {
        let codec = MediaCodec::new();
        assert_eq!(codec.decode("data:image/png;base64,Zm9v").unwrap(), b"foo");
    }

    #[test]
    fn test_decode_invalid() {
        let err = MediaCodec::new().decode("not base64!!").unwrap_err();
        assert!(matches!(err, SyncError::Base64(_)));
    }

    #[test]
    fn test_strip_data_uri() {
        assert_eq!(strip_data_uri("data:application/pdf;base64,JVBE"), "JVBE");
        assert_eq!(strip_data_uri("JVBE"), "JVBE");
        assert_eq!(strip_data_uri("data:text/plain,hello"), "data:text/plain,hello");
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("photo.png"), ".png");
        assert_eq!(extension_of("Report.Final.PDF"), ".PDF");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), ".README");
    }

    #[test]
    fn test_attach_sets_media() {
        let codec = MediaCodec::new();
        let mut msg = Message::new(1, "Estudante", "Oi");
        codec
            .attach(&mut msg, &MediaFile::new("a.gif", "image/gif", b"foo".to_vec()))
            .unwrap();
        assert_eq!(msg.media_extension.as_deref(), Some(".gif"));
        assert_eq!(msg.media_payload.as_deref(), Some("Zm9v"));
    }

    #[test]
    fn test_attach_rejection_leaves_message_unchanged() {
        let codec = MediaCodec::new();
        let mut msg = Message::new(1, "Estudante", "Oi").with_media(".png", "Zm9v");
        let before = msg.clone();
        let result = codec.attach(&mut msg, &MediaFile::new("a.exe", "application/x-msdownload", vec![1]));
        assert!(result.is_err());
        assert_eq!(msg, before);
    }

    #[test]
    fn test_detach() {
        let codec = MediaCodec::new();
        let mut msg = Message::new(1, "Estudante", "Oi").with_media(".png", "Zm9v");
        codec.detach(&mut msg);
        assert!(!msg.has_media());
        assert!(msg.media_extension.is_none());
    }
}
