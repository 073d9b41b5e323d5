use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DIALOG_ID: AtomicU64 = AtomicU64::new(0);

/// Process-wide unique identifier handed to every dialog at construction.
///
/// The id carries no meaning beyond scoping element identifiers such as
/// `numpad3-enter`, so two dialogs of the same kind never answer to each
/// other's clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogId(u64);

impl DialogId {
    pub fn next() -> Self {
        Self(NEXT_DIALOG_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn scope(self, kind: &str) -> String {
        format!("{kind}{}", self.0)
    }

    pub fn element(self, kind: &str, part: &str) -> String {
        format!("{kind}{}-{part}", self.0)
    }

    /// Strips this dialog's scope from `element`, returning the local part.
    pub fn local_part<'a>(self, kind: &str, element: &'a str) -> Option<&'a str> {
        element
            .strip_prefix(kind)?
            .strip_prefix(self.0.to_string().as_str())?
            .strip_prefix('-')
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::DialogId;

    #[test]
    fn ids_are_strictly_increasing() {
        let first = DialogId::next();
        let second = DialogId::next();
        assert!(second > first);
    }

    #[test]
    fn local_part_only_matches_own_scope() {
        let id = DialogId::next();
        let other = DialogId::next();
        let element = id.element("numpad", "key-7");

        assert_eq!(id.local_part("numpad", &element), Some("key-7"));
        assert_eq!(other.local_part("numpad", &element), None);
        assert_eq!(id.local_part("selector", &element), None);
    }
}
