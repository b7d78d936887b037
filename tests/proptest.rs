//! Property-based tests for disparo.
//!
//! These tests generate random record batches and groups to check the
//! normalization and diff invariants.

use std::collections::HashSet;

use proptest::prelude::*;

use disparo::core::{diff, normalize};
use disparo::wire::MessageRecord;
use disparo::{Message, MessageGroup};

/// Generate content from predefined values, envelopes and broken envelopes.
fn arb_content() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Olá".to_string(),
        String::new(),
        "   ".to_string(),
        "[URGENTE] aviso".to_string(),
        r#"[{"messageText":"hi","midiaExtension":".png","midiaBase64":"Zm9v"}]"#.to_string(),
        "[]".to_string(),
        "[not valid json".to_string(),
        "🎉 emoji".to_string(),
    ])
}

/// Generate records with unique ids and a handful of disparo ids.
fn arb_records(max_len: usize) -> impl Strategy<Value = Vec<MessageRecord>> {
    prop::collection::hash_set(0u64..10_000, 0..max_len)
        .prop_flat_map(|ids| {
            let ids: Vec<u64> = ids.into_iter().collect();
            let len = ids.len();
            (
                Just(ids),
                prop::collection::vec(1u64..8, len),
                prop::collection::vec(arb_content(), len),
            )
        })
        .prop_map(|(ids, disparos, contents)| {
            ids.into_iter()
                .zip(disparos)
                .zip(contents)
                .map(|((id, disparo_id), conteudo)| {
                    MessageRecord::new(id, disparo_id, "Estudante", conteudo)
                })
                .collect()
        })
}

fn arb_group() -> impl Strategy<Value = MessageGroup> {
    (1u64..100, prop::collection::vec(arb_content(), 0..8)).prop_map(|(disparo_id, contents)| {
        let mensagens = contents
            .into_iter()
            .enumerate()
            .map(|(i, c)| Message::new(disparo_id * 100 + i as u64, "Visitante", c))
            .collect();
        MessageGroup::new(disparo_id, mensagens)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // NORMALIZATION PROPERTIES
    // ============================================

    /// Every input id appears exactly once in the output
    #[test]
    fn normalize_partitions_ids(records in arb_records(40)) {
        let input: HashSet<u64> = records.iter().map(|r| r.id).collect();
        let groups = normalize(records.clone());

        let output: Vec<u64> = groups.iter().flat_map(|g| g.mensagens.iter().map(|m| m.id)).collect();
        prop_assert_eq!(output.len(), records.len());
        prop_assert_eq!(output.into_iter().collect::<HashSet<_>>(), input);
    }

    /// Every message lands in the group of its disparo_id
    #[test]
    fn normalize_groups_by_key(records in arb_records(40)) {
        let groups = normalize(records.clone());
        for record in &records {
            let group = groups.iter().find(|g| g.disparo_id == record.disparo_id);
            prop_assert!(group.is_some_and(|g| g.message(record.id).is_some()));
        }
    }

    /// Messages ascend by id within each group
    #[test]
    fn normalize_orders_messages(records in arb_records(40)) {
        for group in normalize(records) {
            prop_assert!(group.mensagens.windows(2).all(|w| w[0].id <= w[1].id));
        }
    }

    /// Groups ascend strictly by disparo_id, so ids are distinct
    #[test]
    fn normalize_orders_groups(records in arb_records(40)) {
        let groups = normalize(records);
        prop_assert!(groups.windows(2).all(|w| w[0].disparo_id < w[1].disparo_id));
        prop_assert!(groups.iter().all(|g| !g.is_empty()));
    }

    /// Input order does not matter
    #[test]
    fn normalize_ignores_input_order(records in arb_records(30)) {
        let mut reversed = records.clone();
        reversed.reverse();
        prop_assert_eq!(normalize(records), normalize(reversed));
    }

    // ============================================
    // DIFF PROPERTIES
    // ============================================

    /// Identical snapshots never produce changes
    #[test]
    fn diff_identity_is_empty(group in arb_group()) {
        prop_assert!(diff(&group, &group).is_empty());
    }

    /// Editing one message yields exactly that message
    #[test]
    fn diff_single_edit(group in arb_group(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!group.is_empty());
        let index = pick.index(group.len());
        let mut edited = group.clone();
        edited.mensagens[index].conteudo.push_str(" (editado)");

        let delta = diff(&group, &edited);
        prop_assert_eq!(delta.len(), 1);
        prop_assert_eq!(delta.upserted().next(), Some(&edited.mensagens[index]));
    }
}
