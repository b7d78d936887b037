//! # Disparo
//!
//! A Rust library for keeping message-template groups in sync with a remote
//! messaging service and preparing batch dispatches.
//!
//! ## Overview
//!
//! The remote service stores dispatch templates as flat records, one per
//! message, each tagged with the `disparo_id` of the group it belongs to.
//! Disparo:
//! - **normalizes** those records into ordered [`MessageGroup`]s, splitting
//!   JSON content envelopes into text and media;
//! - **diffs** an edited group against its original snapshot so only changed
//!   messages are sent back;
//! - **validates and encodes** attachments as headerless base64;
//! - **aggregates** per-recipient dispatch results into one summary.
//!
//! Network transport and spreadsheet decoding are left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use disparo::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let groups = normalize_json(r#"[
//!         {"id": 2, "disparo_id": 1, "categoria": "Visitante", "conteudo": "Bem-vindo"},
//!         {"id": 1, "disparo_id": 1, "categoria": "Estudante", "conteudo": "Oi"}
//!     ]"#)?;
//!     let store = GroupStore::from(groups);
//!
//!     let original = store.checkout(1)?;
//!     let mut edited = original.clone();
//!     MediaCodec::new().attach(
//!         &mut edited.mensagens[0],
//!         &MediaFile::new("flyer.png", "image/png", vec![1, 2, 3]),
//!     )?;
//!
//!     let delta = diff(&original, &edited);
//!     let payload = delta
//!         .to_update_payload()
//!         .ok_or_else(|| SyncError::invalid_input("attachment left the group unchanged"))?;
//!     println!("{}", serde_json::to_string(&payload)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`core`] — Normalization, diffing, media, dispatch summaries, the group store
//! - [`message`] — [`Message`] and [`MessageGroup`]
//! - [`wire`] — Request and response shapes of the remote service
//! - [`config`] — [`MediaConfig`](config::MediaConfig), [`SyncConfig`](config::SyncConfig)
//! - [`error`] — Unified error types ([`SyncError`], [`Result`])
//! - [`cli`] — CLI argument types (`cli` feature)
//! - [`prelude`] — Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod wire;

// Re-export the main types at the crate root for convenience
pub use error::{Result, SyncError};
pub use message::{Message, MessageGroup};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use disparo::prelude::*;
/// ```
pub mod prelude {
    // Canonical model
    pub use crate::{Message, MessageGroup};

    // Error types
    pub use crate::error::{Result, SyncError};

    // Configuration
    pub use crate::config::{MediaConfig, SyncConfig};

    // Core operations
    pub use crate::core::{
        Change, Content, GroupBuilder, GroupDelta, GroupStore, MediaCodec, MediaFile,
        ParsedContent, Summary, SummaryKind, aggregate, diff, normalize, normalize_json,
    };

    // Wire shapes
    pub use crate::wire::{
        CreatePayload, DispatchOutcome, DispatchPayload, MessageRecord, SpreadsheetRow,
        UpdatePayload,
    };
}
