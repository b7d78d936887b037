//! Construction of a brand-new message group.
//!
//! A new group offers one message per configured category (by default
//! `Associado/Cliente`, `Estudante`, `Fornecedor`, `Visitante`, `Funcionário`).
//! Only categories with non-blank text become messages. The new group takes
//! the next free `disparo_id` and its message ids come from an
//! [`IdAllocator`].
//!
//! # Example
//!
//! ```
//! use disparo::core::create::GroupBuilder;
//! use disparo::wire::CreatePayload;
//!
//! let mut builder = GroupBuilder::new();
//! builder.set("Estudante", "Hello students")?;
//! builder.set("Visitante", "Welcome")?;
//!
//! // Previous highest disparo_id is 4.
//! let group = builder.build(4)?;
//! assert_eq!(group.disparo_id, 5);
//! assert_eq!(group.mensagens.iter().map(|m| m.id).collect::<Vec<_>>(), vec![42, 44]);
//!
//! let payload = CreatePayload::from(&group);
//! assert_eq!(payload.mensagens[0].categoria, "Estudante");
//! # Ok::<(), disparo::SyncError>(())
//! ```

use std::collections::HashMap;

use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::message::{Message, MessageGroup};

/// Assigns ids to the messages of a new group.
pub trait IdAllocator {
    /// Returns the id for the message at `index` in the category list.
    ///
    /// `base` is the highest `disparo_id` in the collection before the new
    /// group is added. `None` means no id fits in a `u64`.
    fn allocate(&self, base: u64, index: usize) -> Option<u64>;
}

/// `base * 10 + index + 1`, the scheme the remote service expects.
///
/// Ids collide once a group has more than ten categories or across groups
/// whose bases differ by less than the category count.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticIds;

impl IdAllocator for ArithmeticIds {
    fn allocate(&self, base: u64, index: usize) -> Option<u64> {
        base.checked_mul(10)?
            .checked_add(u64::try_from(index).ok()?)?
            .checked_add(1)
    }
}

/// Collects per-category text for a new group.
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    categories: Vec<String>,
    contents: HashMap<String, String>,
}

impl Default for GroupBuilder {
    fn default() -> Self {
        Self::with_config(&SyncConfig::default())
    }
}

impl GroupBuilder {
    /// Creates a builder over the default categories.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &SyncConfig) -> Self {
        Self {
            categories: config.categories.clone(),
            contents: HashMap::new(),
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Sets the text for `categoria`, which must be one of the configured
    /// categories.
    pub fn set(&mut self, categoria: &str, text: impl Into<String>) -> Result<&mut Self> {
        if !self.categories.iter().any(|c| c == categoria) {
            return Err(SyncError::invalid_input(format!(
                "unknown category '{categoria}'"
            )));
        }
        self.contents.insert(categoria.to_string(), text.into());
        Ok(self)
    }

    /// Clears all entered text.
    pub fn reset(&mut self) {
        self.contents.clear();
    }

    /// Returns `true` if at least one category has non-blank text.
    pub fn has_content(&self) -> bool {
        self.contents.values().any(|t| !t.trim().is_empty())
    }

    /// Builds the group with [`ArithmeticIds`].
    ///
    /// `max_disparo_id` is the highest id currently in the collection (0 if
    /// empty); the group gets `max_disparo_id + 1`.
    pub fn build(&self, max_disparo_id: u64) -> Result<MessageGroup> {
        self.build_with(max_disparo_id, &ArithmeticIds)
    }

    /// Builds the group with a custom id allocator.
    pub fn build_with(
        &self,
        max_disparo_id: u64,
        ids: &dyn IdAllocator,
    ) -> Result<MessageGroup> {
        if !self.has_content() {
            return Err(SyncError::EmptyGroup);
        }

        let disparo_id = max_disparo_id.checked_add(1).ok_or_else(|| {
            SyncError::invalid_input(format!("no disparo_id follows {max_disparo_id}"))
        })?;

        let mensagens = self
            .categories
            .iter()
            .enumerate()
            .filter_map(|(index, categoria)| {
                let text = self.contents.get(categoria)?;
                if text.trim().is_empty() {
                    return None;
                }
                let id = ids.allocate(max_disparo_id, index).ok_or_else(|| {
                    SyncError::invalid_input(format!(
                        "message id for '{categoria}' overflows base {max_disparo_id}"
                    ))
                });
                Some(id.map(|id| Message::new(id, categoria.clone(), text.clone())))
            })
            .collect::<Result<Vec<Message>>>()?;

        tracing::debug!(disparo_id, messages = mensagens.len(), "built new message group");
        Ok(MessageGroup::new(disparo_id, mensagens))
    }
}
