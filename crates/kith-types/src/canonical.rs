//! Canonical string forms for identifiers.
//!
//! Every equality check in the core goes through [`Canonical::canonical`],
//! so a parsed [`uuid::Uuid`] and the id types built on it compare equal in
//! any shape. Parsed ids render as lowercase hyphenated UUIDs. Raw strings
//! are compared exactly as written, so an uppercase UUID string only matches
//! an id after it has been parsed.

use std::borrow::Cow;

/// A value with a stable string form used for all equality comparisons.
pub trait Canonical {
    /// The canonical string form. Two values denote the same logical id iff
    /// their canonical forms are equal.
    fn canonical(&self) -> Cow<'_, str>;

    /// Compare two values by canonical form.
    fn same_as<O: Canonical + ?Sized>(&self, other: &O) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Canonical for str {
    fn canonical(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Canonical for String {
    fn canonical(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl Canonical for uuid::Uuid {
    fn canonical(&self) -> Cow<'_, str> {
        Cow::Owned(self.hyphenated().to_string())
    }
}

impl<T: Canonical + ?Sized> Canonical for &T {
    fn canonical(&self) -> Cow<'_, str> {
        (**self).canonical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_their_own_canonical_form() {
        assert_eq!("u1".canonical(), "u1");
        assert_eq!(String::from("u1").canonical(), "u1");
    }

    #[test]
    fn same_as_crosses_shapes() {
        let owned = String::from("abc");
        assert!(owned.same_as("abc"));
        assert!(!owned.same_as("abd"));
    }

    #[test]
    fn raw_strings_are_not_normalized() {
        let id = crate::MemberId::from_u128(0xAB);
        let upper = id.to_string().to_uppercase();
        assert!(!id.same_as(upper.as_str()));
        assert!(id.same_as(&crate::MemberId::parse(&upper).unwrap()));
        assert!(id.same_as(id.to_string().as_str()));
    }

    #[test]
    fn uuid_canonical_is_lowercase_hyphenated() {
        let id = uuid::Uuid::from_u128(0xAB);
        assert_eq!(id.canonical(), "00000000-0000-0000-0000-0000000000ab");
    }
}
