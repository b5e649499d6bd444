//! Order-preserving set algebra over identifier sequences.
//!
//! Both operations compare elements by their [`Canonical`] form, never by
//! in-memory identity, and always return a fresh `Vec`. Inputs are borrowed
//! and left untouched, so a sequence handed to one operation can safely be
//! reused as historical data by the next.

use std::collections::HashSet;

use kith_types::Canonical;

/// Elements of `base`, in their original order, whose canonical form does not
/// appear in `remove`.
///
/// Duplicates in `base` that survive are all kept.
pub fn difference<T, R>(base: &[T], remove: &[R]) -> Vec<T>
where
    T: Canonical + Clone,
    R: Canonical,
{
    let removed: HashSet<String> = remove.iter().map(|r| r.canonical().into_owned()).collect();
    base.iter()
        .filter(|item| !removed.contains(&*item.canonical()))
        .cloned()
        .collect()
}

/// Elements of `a`, in `a`'s order, whose canonical form also appears in `b`.
///
/// Not symmetric: the output order always follows the first argument.
pub fn intersection<T, R>(a: &[T], b: &[R]) -> Vec<T>
where
    T: Canonical + Clone,
    R: Canonical,
{
    let present: HashSet<String> = b.iter().map(|r| r.canonical().into_owned()).collect();
    a.iter()
        .filter(|item| present.contains(&*item.canonical()))
        .cloned()
        .collect()
}

/// Whether `needle` occurs in `haystack` by canonical form.
pub fn contains<T, N>(haystack: &[T], needle: &N) -> bool
where
    T: Canonical,
    N: Canonical + ?Sized,
{
    let key = needle.canonical();
    haystack.iter().any(|item| item.canonical() == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kith_types::MemberId;
    use proptest::prelude::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn difference_keeps_base_order() {
        let base = ids(&["u1", "u2", "u3", "u4"]);
        let out = difference(&base, &ids(&["u3", "u1"]));
        assert_eq!(out, ids(&["u2", "u4"]));
    }

    #[test]
    fn difference_does_not_touch_inputs() {
        let base = ids(&["u1", "u2"]);
        let remove = ids(&["u1"]);
        let _ = difference(&base, &remove);
        assert_eq!(base, ids(&["u1", "u2"]));
        assert_eq!(remove, ids(&["u1"]));
    }

    #[test]
    fn difference_with_empty_remove_is_identity() {
        let base = ids(&["u1", "u1", "u2"]);
        let none: Vec<String> = Vec::new();
        assert_eq!(difference(&base, &none), base);
    }

    #[test]
    fn intersection_follows_first_argument() {
        let a = ids(&["u3", "u1", "u2"]);
        let b = ids(&["u1", "u2", "u3"]);
        assert_eq!(intersection(&a, &b), ids(&["u3", "u1", "u2"]));
        assert_eq!(intersection(&b, &a), ids(&["u1", "u2", "u3"]));
    }

    #[test]
    fn intersection_keeps_duplicates_from_first_argument() {
        let a = ids(&["u1", "u1", "u2"]);
        let b = ids(&["u1"]);
        assert_eq!(intersection(&a, &b), ids(&["u1", "u1"]));
    }

    #[test]
    fn comparison_uses_canonical_form_across_types() {
        let m = MemberId::from_u128(42);
        let spelled = vec![m.to_string()];
        assert_eq!(intersection(&[m], &spelled), vec![m]);
        assert!(difference(&[m], &spelled).is_empty());
        assert!(contains(&[m], m.to_string().as_str()));
    }

    proptest! {
        #[test]
        fn difference_never_contains_removed(
            base in prop::collection::vec("[a-e]", 0..12),
            remove in prop::collection::vec("[a-e]", 0..6),
        ) {
            let out = difference(&base, &remove);
            prop_assert!(out.len() <= base.len());
            for item in &out {
                prop_assert!(!remove.contains(item));
            }
        }

        #[test]
        fn difference_is_a_subsequence_of_base(
            base in prop::collection::vec("[a-e]", 0..12),
            remove in prop::collection::vec("[a-e]", 0..6),
        ) {
            let out = difference(&base, &remove);
            let mut rest = base.iter();
            for item in &out {
                prop_assert!(rest.any(|b| b == item));
            }
        }

        #[test]
        fn intersection_is_deterministic_and_ordered_by_a(
            a in prop::collection::vec("[a-f]", 0..12),
            b in prop::collection::vec("[a-f]", 0..12),
        ) {
            let first = intersection(&a, &b);
            let second = intersection(&a, &b);
            prop_assert_eq!(&first, &second);

            let expected: Vec<String> = a.iter().filter(|x| b.contains(x)).cloned().collect();
            prop_assert_eq!(first, expected);
        }

        #[test]
        fn intersection_and_difference_partition_a(
            a in prop::collection::vec("[a-f]", 0..12),
            b in prop::collection::vec("[a-f]", 0..12),
        ) {
            let both = intersection(&a, &b);
            let only_a = difference(&a, &b);
            prop_assert_eq!(both.len() + only_a.len(), a.len());
        }
    }
}
