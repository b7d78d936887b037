//! Grouping of flat message records into ordered [`MessageGroup`]s.
//!
//! The "fetch messages" endpoints return one record per message, in no
//! particular order. [`normalize`] sorts them by id, folds them into one group
//! per `disparo_id` and returns the groups sorted by `disparo_id`:
//!
//! ```text
//! Input:  [(id 3, disparo 2), (id 1, disparo 2), (id 2, disparo 1)]
//! Output: [disparo 1: [2], disparo 2: [1, 3]]
//! ```
//!
//! Each record's `conteudo` goes through
//! [`Content::parse`](crate::core::content::Content::parse), so envelope
//! records come out with their text and media split apart.

use std::collections::BTreeMap;

use crate::core::content::ParsedContent;
use crate::error::Result;
use crate::message::{Message, MessageGroup};
use crate::wire::{MessageRecord, parse_records};

/// Groups `records` by `disparo_id`.
///
/// Every input record ends up in exactly one group. Messages within a group
/// are in ascending id order and groups are in ascending `disparo_id` order.
/// Empty input gives an empty vector.
///
/// # Example
///
/// ```
/// use disparo::core::normalize::normalize;
/// use disparo::wire::MessageRecord;
///
/// let groups = normalize(vec![
///     MessageRecord::new(3, 2, "Estudante", "c"),
///     MessageRecord::new(1, 2, "Visitante", "a"),
///     MessageRecord::new(2, 1, "Estudante", "b"),
/// ]);
///
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].disparo_id, 1);
/// assert_eq!(groups[1].mensagens.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 3]);
/// ```
pub fn normalize<I>(records: I) -> Vec<MessageGroup>
where
    I: IntoIterator<Item = MessageRecord>,
{
    let mut records: Vec<MessageRecord> = records.into_iter().collect();
    let record_count = records.len();

    // Stable, so any repeated id keeps its arrival order.
    records.sort_by_key(|r| r.id);

    let mut grouped: BTreeMap<u64, MessageGroup> = BTreeMap::new();
    for record in records {
        let disparo_id = record.disparo_id;
        grouped
            .entry(disparo_id)
            .or_insert_with(|| MessageGroup::new(disparo_id, Vec::new()))
            .mensagens
            .push(to_message(record));
    }

    let groups: Vec<MessageGroup> = grouped.into_values().collect();
    tracing::debug!(
        records = record_count,
        groups = groups.len(),
        "normalized message records"
    );
    groups
}

/// Parses a JSON record array and normalizes it.
pub fn normalize_json(json: &str) -> Result<Vec<MessageGroup>> {
    Ok(normalize(parse_records(json)?))
}

/// Converts one record into a canonical message.
///
/// Media fields sent at the top level of the record win over those found in
/// a content envelope.
pub fn to_message(record: MessageRecord) -> Message {
    let parsed = ParsedContent::parse(&record.conteudo);

    Message {
        id: record.id,
        categoria: record.categoria,
        conteudo: parsed.text,
        media_extension: record.midia_extension.or(parsed.media_extension),
        media_payload: record.midia_base64.or(parsed.media_payload),
    }
}
