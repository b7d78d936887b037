//! Configuration types for media validation and group creation.
//!
//! These are plain structs without any CLI framework dependencies, so they can
//! be built in code or loaded from JSON.
//!
//! # Example
//!
//! ```rust
//! use disparo::config::{MediaConfig, SyncConfig};
//!
//! let config = SyncConfig::new()
//!     .with_media(MediaConfig::new().with_max_size_bytes(2 * 1024 * 1024));
//!
//! assert_eq!(config.categories.len(), 5);
//! assert!(config.media.is_allowed_type("image/png"));
//! ```

use serde::{Deserialize, Serialize};

/// Media types an attachment may declare.
pub const DEFAULT_ALLOWED_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "application/pdf",
];

/// Largest attachment accepted by default (10 MiB).
pub const DEFAULT_MAX_MEDIA_SIZE: usize = 10 * 1024 * 1024;

/// Categories offered, in order, when creating a brand-new group.
pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "Associado/Cliente",
    "Estudante",
    "Fornecedor",
    "Visitante",
    "Funcionário",
];

/// Limits applied by [`MediaCodec`](crate::core::media::MediaCodec).
///
/// # Example
///
/// ```rust
/// use disparo::config::MediaConfig;
///
/// let config = MediaConfig::new().with_allowed_types(["image/png"]);
/// assert!(config.is_allowed_type("image/png"));
/// assert!(!config.is_allowed_type("image/jpeg"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Accepted media types (default: jpeg, png, gif, webp, mp4, pdf)
    pub allowed_types: Vec<String>,

    /// Maximum attachment size in bytes (default: 10MB)
    pub max_size_bytes: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
            max_size_bytes: DEFAULT_MAX_MEDIA_SIZE,
        }
    }
}

impl MediaConfig {
    /// Creates a configuration with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the set of accepted media types.
    #[must_use]
    pub fn with_allowed_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the maximum attachment size.
    #[must_use]
    pub fn with_max_size_bytes(mut self, size: usize) -> Self {
        self.max_size_bytes = size;
        self
    }

    /// Returns `true` if `mime` is one of the accepted media types.
    ///
    /// Matching is exact, as browsers report lowercase types.
    pub fn is_allowed_type(&self, mime: &str) -> bool {
        self.allowed_types.iter().any(|t| t == mime)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Attachment limits
    pub media: MediaConfig,

    /// Categories, in order, used when creating a new group
    pub categories: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            media: MediaConfig::default(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl SyncConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the attachment limits.
    #[must_use]
    pub fn with_media(mut self, media: MediaConfig) -> Self {
        self.media = media;
        self
    }

    /// Replaces the category list used when creating groups.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::SyncError::json("configuration", e))
    }
}
