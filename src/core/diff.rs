//! Differential comparison of an edited group against its original snapshot.
//!
//! Messages are matched by id, so the result stays correct even if the edited
//! copy was reordered or had messages added or removed. Each change carries
//! the full current message, which the remote side treats as authoritative
//! for that id.
//!
//! # Example
//!
//! ```
//! use disparo::core::diff::{Change, diff};
//! use disparo::{Message, MessageGroup};
//!
//! let original = MessageGroup::new(1, vec![
//!     Message::new(11, "Estudante", "Oi"),
//!     Message::new(12, "Visitante", "Olá"),
//! ]);
//! let mut edited = original.clone();
//! edited.mensagens[1].conteudo = "Bem-vindo".into();
//!
//! let delta = diff(&original, &edited);
//! assert_eq!(delta.changes, vec![Change::Changed(edited.mensagens[1].clone())]);
//!
//! let payload = delta.to_update_payload().expect("one message changed");
//! assert_eq!(payload.mensagens[0].message_text, "Bem-vindo");
//! ```

use std::collections::{HashMap, HashSet};

use crate::message::{Message, MessageGroup};
use crate::wire::{MessageUpdate, UpdatePayload};

/// One difference between two snapshots of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Present on both sides with different field values.
    Changed(Message),
    /// Present only in the edited snapshot.
    Added(Message),
    /// Present only in the original snapshot.
    Removed(u64),
}

impl Change {
    /// The id of the message this change refers to.
    pub fn id(&self) -> u64 {
        match self {
            Change::Changed(m) | Change::Added(m) => m.id,
            Change::Removed(id) => *id,
        }
    }

    /// The current message, unless it was removed.
    pub fn message(&self) -> Option<&Message> {
        match self {
            Change::Changed(m) | Change::Added(m) => Some(m),
            Change::Removed(_) => None,
        }
    }
}

/// All changes to one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDelta {
    pub disparo_id: u64,
    pub changes: Vec<Change>,
}

impl GroupDelta {
    /// Returns `true` if nothing changed; callers skip the update request.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Changed and added messages, in edited order.
    pub fn upserted(&self) -> impl Iterator<Item = &Message> {
        self.changes.iter().filter_map(Change::message)
    }

    /// Ids present in the original but not in the edited snapshot.
    pub fn removed_ids(&self) -> Vec<u64> {
        self.changes
            .iter()
            .filter_map(|c| match c {
                Change::Removed(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Builds the "update messages" body, or `None` if no message was changed
    /// or added.
    ///
    /// Removals cannot be expressed in this payload; read them from
    /// [`removed_ids`](Self::removed_ids).
    pub fn to_update_payload(&self) -> Option<UpdatePayload> {
        let mensagens: Vec<MessageUpdate> = self.upserted().map(MessageUpdate::from).collect();
        if mensagens.is_empty() {
            return None;
        }
        Some(UpdatePayload {
            disparo_id: self.disparo_id,
            mensagens,
        })
    }
}

/// Compares `edited` with `original`, matching messages by id.
///
/// Changed and added messages follow the order of `edited`; removed ids
/// follow, in the order of `original`. Identical snapshots give an empty
/// delta.
pub fn diff(original: &MessageGroup, edited: &MessageGroup) -> GroupDelta {
    if original.disparo_id != edited.disparo_id {
        tracing::warn!(
            original = original.disparo_id,
            edited = edited.disparo_id,
            "diffing snapshots of different groups"
        );
    }

    let before: HashMap<u64, &Message> = original.mensagens.iter().map(|m| (m.id, m)).collect();
    let mut changes = Vec::new();

    for current in &edited.mensagens {
        match before.get(&current.id) {
            Some(previous) if current.differs_from(previous) => {
                changes.push(Change::Changed(current.clone()));
            }
            Some(_) => {}
            None => changes.push(Change::Added(current.clone())),
        }
    }

    let kept: HashSet<u64> = edited.mensagens.iter().map(|m| m.id).collect();
    changes.extend(
        original
            .mensagens
            .iter()
            .filter(|m| !kept.contains(&m.id))
            .map(|m| Change::Removed(m.id)),
    );

    tracing::debug!(
        disparo_id = edited.disparo_id,
        changes = changes.len(),
        "computed group delta"
    );

    GroupDelta {
        disparo_id: edited.disparo_id,
        changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MessageGroup {
        MessageGroup::new(
            5,
            vec![
                Message::new(51, "Associado/Cliente", "um"),
                Message::new(52, "Estudante", "dois"),
                Message::new(53, "Fornecedor", "três"),
            ],
        )
    }

    #[test]
    fn test_identical_snapshots() {
        let group = sample();
        let delta = diff(&group, &group);
        assert!(delta.is_empty());
        assert!(delta.to_update_payload().is_none());
    }

    #[test]
    fn test_single_content_change() {
        let original = sample();
        let mut edited = original.clone();
        edited.mensagens[1].conteudo = "novo".into();

        let delta = diff(&original, &edited);
        assert_eq!(delta.len(), 1);
        assert_eq!(delta.changes[0], Change::Changed(edited.mensagens[1].clone()));
        assert_eq!(delta.changes[0].id(), 52);
    }

    #[test]
    fn test_media_change_detected() {
        let original = sample();
        let mut edited = original.clone();
        edited.mensagens[2].media_extension = Some(".pdf".into());
        edited.mensagens[2].media_payload = Some("JVBE".into());

        let delta = diff(&original, &edited);
        assert_eq!(delta.upserted().map(|m| m.id).collect::<Vec<_>>(), vec![53]);
    }

    #[test]
    fn test_category_change_detected() {
        let original = sample();
        let mut edited = original.clone();
        edited.mensagens[0].categoria = "Visitante".into();
        assert_eq!(diff(&original, &edited).len(), 1);
    }

    #[test]
    fn test_reordered_without_edits_is_empty() {
        let original = sample();
        let mut edited = original.clone();
        edited.mensagens.reverse();
        assert!(diff(&original, &edited).is_empty());
    }

    #[test]
    fn test_added_and_removed() {
        let original = sample();
        let mut edited = original.clone();
        edited.mensagens.remove(0);
        edited.mensagens.push(Message::new(54, "Visitante", "quatro"));

        let delta = diff(&original, &edited);
        assert_eq!(
            delta.changes,
            vec![
                Change::Added(Message::new(54, "Visitante", "quatro")),
                Change::Removed(51),
            ]
        );
        assert_eq!(delta.removed_ids(), vec![51]);
    }

    #[test]
    fn test_removal_only_has_no_payload() {
        let original = sample();
        let mut edited = original.clone();
        edited.mensagens.pop();

        let delta = diff(&original, &edited);
        assert!(!delta.is_empty());
        assert!(delta.to_update_payload().is_none());
    }

    #[test]
    fn test_update_payload_shape() {
        let original = sample();
        let mut edited = original.clone();
        edited.mensagens[0].conteudo = "editado".into();
        edited.mensagens[2] = edited.mensagens[2].clone().with_media(".png", "Zm9v");

        let payload = diff(&original, &edited).to_update_payload().unwrap();
        assert_eq!(payload.disparo_id, 5);
        assert_eq!(payload.mensagens.len(), 2);

        let first = &payload.mensagens[0];
        assert_eq!(first.id, 51);
        assert_eq!(first.message_text, "editado");
        assert_eq!(first.categoria, "Associado/Cliente");
        assert!(first.midia_extension.is_none());
        assert!(first.midia_base64.is_none());

        let second = &payload.mensagens[1];
        assert_eq!(second.midia_extension.as_deref(), Some(".png"));
        assert_eq!(second.midia_base64.as_deref(), Some("Zm9v"));
    }
}
