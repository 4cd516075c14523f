use roster_api::Student;

/// Derive the visible subset of a snapshot from a free-text query.
///
/// A record matches when the lowercased query is a substring of the
/// lowercased name, email, or course. The empty query matches everything
/// and the result preserves snapshot order. Pure function; nothing is
/// cached across calls.
pub fn apply(snapshot: &[Student], query: &str) -> Vec<Student> {
    if query.is_empty() {
        return snapshot.to_vec();
    }
    let needle = query.to_lowercase();
    snapshot
        .iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&needle)
                || s.email.to_lowercase().contains(&needle)
                || s.course.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn student(id: i64, name: &str, email: &str, course: &str) -> Student {
        Student {
            id,
            name: name.to_string(),
            email: email.to_string(),
            course: course.to_string(),
        }
    }

    #[test]
    fn test_empty_query_is_identity() {
        let snapshot = vec![
            student(1, "Ann", "a@x.com", "CS"),
            student(2, "Bob", "b@x.com", "Math"),
        ];
        assert_eq!(apply(&snapshot, ""), snapshot);
    }

    #[test]
    fn test_case_insensitive_match_on_any_field() {
        let snapshot = vec![student(1, "Ann", "a@x.com", "CS")];
        assert_eq!(apply(&snapshot, "ann").len(), 1);
        assert_eq!(apply(&snapshot, "A@X").len(), 1);
        assert_eq!(apply(&snapshot, "cs").len(), 1);
        assert!(apply(&snapshot, "zz").is_empty());
    }

    #[test]
    fn test_result_preserves_snapshot_order() {
        let snapshot = vec![
            student(3, "Cara", "c@x.com", "CS"),
            student(1, "Ann", "a@x.com", "CS"),
            student(2, "Bob", "b@x.com", "Math"),
        ];
        let ids: Vec<i64> = apply(&snapshot, "cs").iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    proptest! {
        /// Non-empty queries yield an order-preserving subsequence where
        /// every record matches on at least one field.
        #[test]
        fn prop_filter_is_matching_subsequence(
            records in prop::collection::vec(
                ("[a-zA-Z ]{0,8}", "[a-z0-9@.]{0,12}", "[a-zA-Z]{0,6}"),
                0..12
            ),
            query in "[a-zA-Z0-9@.]{1,4}",
        ) {
            let snapshot: Vec<Student> = records
                .into_iter()
                .enumerate()
                .map(|(i, (name, email, course))| Student {
                    id: i as i64,
                    name,
                    email,
                    course,
                })
                .collect();

            let filtered = apply(&snapshot, &query);
            let needle = query.to_lowercase();

            for s in &filtered {
                prop_assert!(
                    s.name.to_lowercase().contains(&needle)
                        || s.email.to_lowercase().contains(&needle)
                        || s.course.to_lowercase().contains(&needle)
                );
            }

            // Subsequence check: ids appear in original order.
            let ids: Vec<i64> = filtered.iter().map(|s| s.id).collect();
            let mut sorted = ids.clone();
            sorted.sort_unstable();
            prop_assert_eq!(ids, sorted);

            // Idempotence: filtering the result again changes nothing.
            prop_assert_eq!(apply(&filtered, &query), filtered);
        }
    }
}
