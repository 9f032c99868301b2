use std::borrow::Cow;
use std::collections::TryReserveError;

/// An owned piece of committed document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    text: String,
}

impl Fragment {
    /// Copy `text` into a new fragment, reporting allocation failure.
    pub fn try_from_str(text: &str) -> Result<Self, TryReserveError> {
        Ok(Self {
            text: copy_text(text)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Self { text }
    }
}

/// Ordered sequence of fragments. Concatenated in order, the fragments are
/// the snapshot content.
///
/// Empty fragments never survive a mutation: `push` skips them and
/// `replace_with` stores nothing for an empty buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentStore {
    fragments: Vec<Fragment>,
}

impl FragmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: Fragment) {
        if !fragment.is_empty() {
            self.fragments.push(fragment);
        }
    }

    /// Drop the current fragments and hold `text` as a single fragment.
    pub fn replace_with(&mut self, text: String) {
        self.fragments.clear();
        self.push(Fragment::from(text));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter()
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Total content length in bytes.
    pub fn content_len(&self) -> usize {
        self.fragments.iter().map(Fragment::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Concatenate every fragment into one string. Never mutates the store.
    pub fn flatten(&self) -> String {
        let mut out = String::with_capacity(self.content_len());
        for fragment in &self.fragments {
            out.push_str(fragment.as_str());
        }
        out
    }

    /// The content as one contiguous string. Borrowed when the store holds at
    /// most one fragment, which is always the case after a commit.
    pub(crate) fn try_contiguous(&self) -> Result<Cow<'_, str>, TryReserveError> {
        match self.fragments.as_slice() {
            [] => Ok(Cow::Borrowed("")),
            [only] => Ok(Cow::Borrowed(only.as_str())),
            fragments => {
                let mut out = String::new();
                out.try_reserve_exact(self.content_len())?;
                for fragment in fragments {
                    out.push_str(fragment.as_str());
                }
                Ok(Cow::Owned(out))
            }
        }
    }
}

/// Copy caller text into engine-owned storage.
pub(crate) fn copy_text(text: &str) -> Result<String, TryReserveError> {
    let mut owned = String::new();
    owned.try_reserve_exact(text.len())?;
    owned.push_str(text);
    Ok(owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(parts: &[&str]) -> FragmentStore {
        let mut store = FragmentStore::new();
        for part in parts {
            store.push(Fragment::try_from_str(part).unwrap());
        }
        store
    }

    #[test]
    fn test_flatten_empty_store() {
        assert_eq!(FragmentStore::new().flatten(), "");
    }

    #[test]
    fn test_flatten_concatenates_in_order() {
        let store = store_of(&["Hello", ", ", "World"]);
        assert_eq!(store.flatten(), "Hello, World");
        assert_eq!(store.content_len(), 12);
    }

    #[test]
    fn test_flatten_does_not_mutate() {
        let store = store_of(&["a", "b"]);
        let before = store.clone();
        let _ = store.flatten();
        assert_eq!(store, before);
    }

    #[test]
    fn test_empty_fragments_are_pruned() {
        let store = store_of(&["", "x", ""]);
        assert_eq!(store.fragment_count(), 1);
    }

    #[test]
    fn test_replace_with_collapses_to_single_fragment() {
        let mut store = store_of(&["one", "two", "three"]);
        store.replace_with("merged".to_string());
        assert_eq!(store.fragment_count(), 1);
        assert_eq!(store.flatten(), "merged");

        store.replace_with(String::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_contiguous_borrows_single_fragment() {
        let store = store_of(&["abc"]);
        assert!(matches!(store.try_contiguous().unwrap(), Cow::Borrowed("abc")));
        assert!(matches!(FragmentStore::new().try_contiguous().unwrap(), Cow::Borrowed("")));
    }

    #[test]
    fn test_contiguous_joins_several_fragments() {
        let store = store_of(&["ab", "cd"]);
        let joined = store.try_contiguous().unwrap();
        assert!(matches!(joined, Cow::Owned(_)));
        assert_eq!(joined, "abcd");
    }
}
