//! The canonical, session-scoped collection of message groups.
//!
//! [`GroupStore`] owns the groups and keeps them sorted by `disparo_id` with
//! no duplicates. Reads hand out clones, so an edit in progress never touches
//! the canonical copy until it is written back with [`GroupStore::upsert`].
//!
//! # Example
//!
//! ```
//! use disparo::core::store::GroupStore;
//! use disparo::{Message, MessageGroup};
//!
//! let mut store = GroupStore::new();
//! store.upsert(MessageGroup::new(2, vec![Message::new(21, "Estudante", "Oi")]));
//! store.upsert(MessageGroup::new(1, vec![]));
//!
//! let mut draft = store.checkout(2)?;
//! draft.mensagens[0].conteudo = "Olá".into();
//! assert_eq!(store.get(2).unwrap().mensagens[0].conteudo, "Oi");
//!
//! store.upsert(draft);
//! assert_eq!(store.get(2).unwrap().mensagens[0].conteudo, "Olá");
//! assert_eq!(store.next_disparo_id()?, 3);
//! # Ok::<(), disparo::SyncError>(())
//! ```

use crate::error::{Result, SyncError};
use crate::message::MessageGroup;

#[derive(Debug, Clone, Default)]
pub struct GroupStore {
    groups: Vec<MessageGroup>,
}

impl GroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from groups in any order. A later group replaces an
    /// earlier one with the same `disparo_id`.
    pub fn from_groups(groups: impl IntoIterator<Item = MessageGroup>) -> Self {
        let mut store = Self::new();
        for group in groups {
            store.upsert(group);
        }
        store
    }

    /// Copy of every group, sorted by `disparo_id`.
    pub fn all(&self) -> Vec<MessageGroup> {
        self.groups.clone()
    }

    /// Copy of one group.
    pub fn get(&self, disparo_id: u64) -> Option<MessageGroup> {
        self.position(disparo_id)
            .ok()
            .map(|index| self.groups[index].clone())
    }

    /// Copy of one group for editing, or [`SyncError::UnknownGroup`].
    pub fn checkout(&self, disparo_id: u64) -> Result<MessageGroup> {
        self.get(disparo_id)
            .ok_or(SyncError::UnknownGroup(disparo_id))
    }

    pub fn contains(&self, disparo_id: u64) -> bool {
        self.position(disparo_id).is_ok()
    }

    /// Inserts `group`, or replaces the group with the same `disparo_id`.
    ///
    /// Returns the replaced group.
    pub fn upsert(&mut self, group: MessageGroup) -> Option<MessageGroup> {
        let disparo_id = group.disparo_id;
        match self.position(disparo_id) {
            Ok(index) => {
                tracing::debug!(disparo_id, "replaced message group");
                Some(std::mem::replace(&mut self.groups[index], group))
            }
            Err(index) => {
                tracing::debug!(disparo_id, "inserted message group");
                self.groups.insert(index, group);
                None
            }
        }
    }

    /// Removes and returns a group.
    pub fn remove(&mut self, disparo_id: u64) -> Option<MessageGroup> {
        let index = self.position(disparo_id).ok()?;
        tracing::debug!(disparo_id, "removed message group");
        Some(self.groups.remove(index))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Highest `disparo_id` held, or 0 when empty.
    pub fn max_disparo_id(&self) -> u64 {
        self.groups.last().map_or(0, |g| g.disparo_id)
    }

    /// The `disparo_id` a newly created group receives.
    ///
    /// Fails with [`SyncError::InvalidInput`] once `u64::MAX` is taken.
    pub fn next_disparo_id(&self) -> Result<u64> {
        let max = self.max_disparo_id();
        max.checked_add(1)
            .ok_or_else(|| SyncError::invalid_input(format!("no disparo_id follows {max}")))
    }

    fn position(&self, disparo_id: u64) -> std::result::Result<usize, usize> {
        self.groups
            .binary_search_by_key(&disparo_id, |g| g.disparo_id)
    }
}

impl From<Vec<MessageGroup>> for GroupStore {
    fn from(groups: Vec<MessageGroup>) -> Self {
        Self::from_groups(groups)
    }
}
