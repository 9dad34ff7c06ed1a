//! Derived views over the cache snapshot.
//!
//! Pure, synchronous functions: no mutation, no network, total over any
//! snapshot. "Nothing matched" is an empty result, never an error. All
//! functions preserve the snapshot's reverse-chronological order.

use rand::seq::SliceRandom;

use crate::models::{Neologism, NeologismStatus};
use crate::utils::contains_ignore_case;

/// Sentinel filter value meaning "no filter". An empty string means the
/// same thing, so select widgets can pass their state through unmapped.
pub const FILTER_ALL: &str = "all";

/// Check if a neologism matches the search query.
/// Query should already be lowercased.
fn matches_query(neologism: &Neologism, query: &str) -> bool {
    contains_ignore_case(&neologism.name, query)
        || contains_ignore_case(&neologism.definition, query)
        || neologism
            .root_words
            .iter()
            .any(|w| contains_ignore_case(w, query))
}

/// Case-insensitive substring search over name, definition, and root words.
/// An empty query returns the full sequence unfiltered, in existing order.
pub fn search_neologisms<'a>(neologisms: &'a [Neologism], query: &str) -> Vec<&'a Neologism> {
    if query.is_empty() {
        return neologisms.iter().collect();
    }

    let query = query.to_lowercase();
    neologisms
        .iter()
        .filter(|n| matches_query(n, &query))
        .collect()
}

/// Filter by category id. `""` and `"all"` return the unfiltered sequence.
pub fn filter_by_category<'a>(
    neologisms: &'a [Neologism],
    category_id: &str,
) -> Vec<&'a Neologism> {
    if category_id.is_empty() || category_id == FILTER_ALL {
        return neologisms.iter().collect();
    }

    neologisms
        .iter()
        .filter(|n| n.category_id.as_deref() == Some(category_id))
        .collect()
}

/// Filter by status wire string. `""` and `"all"` return the unfiltered
/// sequence.
pub fn filter_by_status<'a>(neologisms: &'a [Neologism], status: &str) -> Vec<&'a Neologism> {
    if status.is_empty() || status == FILTER_ALL {
        return neologisms.iter().collect();
    }

    neologisms
        .iter()
        .filter(|n| n.status.as_str() == status)
        .collect()
}

/// The most recently created neologism, or None when the snapshot is empty.
/// Relies on the snapshot's newest-first ordering invariant rather than
/// scanning timestamps.
pub fn latest_neologism(neologisms: &[Neologism]) -> Option<&Neologism> {
    neologisms.first()
}

/// Sticky-then-random "word of the moment" selection.
///
/// While `sticky_id` names a record still present in the snapshot, that
/// record is returned deterministically on every call, whatever its status.
/// Otherwise one record is sampled uniformly from the Ready subset; None
/// when that subset is empty.
pub fn random_neologism<'a>(
    neologisms: &'a [Neologism],
    sticky_id: Option<&str>,
) -> Option<&'a Neologism> {
    if let Some(id) = sticky_id {
        if let Some(sticky) = neologisms.iter().find(|n| n.id == id) {
            return Some(sticky);
        }
    }

    let ready: Vec<&Neologism> = neologisms
        .iter()
        .filter(|n| n.status == NeologismStatus::Ready)
        .collect();

    ready.choose(&mut rand::thread_rng()).copied()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn word(id: &str, name: &str, status: NeologismStatus, age_minutes: i64) -> Neologism {
        Neologism {
            id: id.to_string(),
            name: name.to_string(),
            root_words: vec!["root".to_string(), name.to_string()],
            category_id: Some("cat-1".to_string()),
            category: Some("Emotions".to_string()),
            definition: format!("The feeling of {}", name),
            image_url: None,
            status,
            created_at: Utc.with_ymd_and_hms(2025, 4, 2, 12, 0, 0).unwrap()
                - Duration::minutes(age_minutes),
        }
    }

    fn sample() -> Vec<Neologism> {
        vec![
            word("c", "snirkle", NeologismStatus::Ready, 0),
            word("b", "blurp", NeologismStatus::Draft, 10),
            word("a", "gloamish", NeologismStatus::Ready, 20),
        ]
    }

    #[test]
    fn test_search_empty_query_is_identity() {
        let words = sample();
        let results = search_neologisms(&words, "");
        assert_eq!(results.len(), words.len());
        // Order preserved
        assert_eq!(results[0].id, "c");
        assert_eq!(results[2].id, "a");
    }

    #[test]
    fn test_search_matches_name_definition_and_roots() {
        let words = sample();

        // Name match, case-insensitive
        let by_name = search_neologisms(&words, "SNIRK");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "c");

        // Definition match
        let by_definition = search_neologisms(&words, "feeling of blurp");
        assert_eq!(by_definition.len(), 1);
        assert_eq!(by_definition[0].id, "b");

        // Root word match
        let by_root = search_neologisms(&words, "gloam");
        assert_eq!(by_root.len(), 1);
        assert_eq!(by_root[0].id, "a");
    }

    #[test]
    fn test_search_is_subset_of_snapshot() {
        let words = sample();
        for query in ["s", "e", "zzz", "root"] {
            let results = search_neologisms(&words, query);
            assert!(results.len() <= words.len());
            for n in results {
                assert!(words.iter().any(|w| w.id == n.id));
            }
        }
    }

    #[test]
    fn test_filter_by_category_sentinels() {
        let words = sample();
        assert_eq!(filter_by_category(&words, "").len(), 3);
        assert_eq!(filter_by_category(&words, FILTER_ALL).len(), 3);
    }

    #[test]
    fn test_filter_by_category_identity_match() {
        let mut words = sample();
        words[1].category_id = Some("cat-2".to_string());
        words[2].category_id = None;

        let filtered = filter_by_category(&words, "cat-1");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "c");

        // Uncategorized records never match a concrete filter
        assert!(filter_by_category(&words, "cat-9").is_empty());
    }

    #[test]
    fn test_filter_by_status() {
        let words = sample();

        let ready = filter_by_status(&words, "Ready");
        assert_eq!(ready.len(), 2);
        assert!(ready.iter().all(|n| n.status == NeologismStatus::Ready));

        assert_eq!(filter_by_status(&words, "all").len(), 3);
        assert_eq!(filter_by_status(&words, "").len(), 3);
        assert!(filter_by_status(&words, "Retired").is_empty());
    }

    #[test]
    fn test_latest_is_head_of_sequence() {
        let words = sample();
        assert_eq!(latest_neologism(&words).unwrap().id, "c");
        assert!(latest_neologism(&[]).is_none());
    }

    #[test]
    fn test_sticky_random_is_deterministic() {
        let words: Vec<Neologism> = (0..5)
            .map(|i| word(&format!("id-{}", i), &format!("word{}", i), NeologismStatus::Ready, i))
            .collect();

        for _ in 0..100 {
            let picked = random_neologism(&words, Some("id-3")).unwrap();
            assert_eq!(picked.id, "id-3");
        }
    }

    #[test]
    fn test_sticky_ignores_status() {
        // The sticky pointer features the newest creation even while it is
        // still a draft.
        let words = sample();
        let picked = random_neologism(&words, Some("b")).unwrap();
        assert_eq!(picked.id, "b");
    }

    #[test]
    fn test_random_falls_back_when_sticky_is_gone() {
        let words = sample();
        for _ in 0..50 {
            let picked = random_neologism(&words, Some("deleted-id")).unwrap();
            // Fallback samples only from the Ready subset
            assert!(picked.id == "c" || picked.id == "a");
            assert_eq!(picked.status, NeologismStatus::Ready);
        }
    }

    #[test]
    fn test_random_none_when_no_ready_records() {
        let words = vec![
            word("b", "blurp", NeologismStatus::Draft, 0),
            word("z", "zonked", NeologismStatus::Archived, 5),
        ];
        assert!(random_neologism(&words, None).is_none());
        assert!(random_neologism(&[], None).is_none());
    }
}
