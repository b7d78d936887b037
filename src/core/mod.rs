//! Core normalization and synchronization logic.
//!
//! This module contains:
//! - [`content`] - Lenient parsing of raw `conteudo` fields
//! - [`media`] - Attachment validation and base64 encoding
//! - [`normalize`] - Grouping flat records into ordered groups
//! - [`diff`] - Id-keyed comparison of edited groups
//! - [`dispatch`] - Tallying dispatch responses
//! - [`store`] - The canonical group collection
//! - [`create`] - Building brand-new groups
//!
//! Everything here is synchronous and free of I/O.
//!
//! # Quick Start
//!
//! ```rust
//! use disparo::core::{GroupStore, diff, normalize};
//! use disparo::wire::MessageRecord;
//!
//! let mut store = GroupStore::from(normalize(vec![
//!     MessageRecord::new(1, 1, "Estudante", "Oi"),
//! ]));
//!
//! let original = store.checkout(1)?;
//! let mut edited = original.clone();
//! edited.mensagens[0].conteudo = "Olá".into();
//!
//! if let Some(payload) = diff(&original, &edited).to_update_payload() {
//!     // send `payload` to the update endpoint, then on success:
//!     assert_eq!(payload.mensagens.len(), 1);
//!     store.upsert(edited);
//! }
//! # Ok::<(), disparo::SyncError>(())
//! ```

pub mod content;
pub mod create;
pub mod diff;
pub mod dispatch;
pub mod media;
pub mod normalize;
pub mod store;

// Re-export main types for convenience
pub use content::{Content, Envelope, ParsedContent};
pub use create::{ArithmeticIds, GroupBuilder, IdAllocator};
pub use diff::{Change, GroupDelta, diff};
pub use dispatch::{Summary, SummaryKind, aggregate, aggregate_outcomes};
pub use media::{MediaCodec, MediaFile, extension_of, strip_data_uri};
pub use normalize::{normalize, normalize_json};
pub use store::GroupStore;
