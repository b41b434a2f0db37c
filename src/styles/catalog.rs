/// Index of the reserved "no stylization" entry
pub const PASSTHROUGH_STYLE: usize = 0;

/// A named transformation identity
///
/// Styles are immutable and owned by the catalog; the rest of the system
/// references them by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    index: usize,
    name: String,
}

impl Style {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the reserved identity style
    pub fn is_passthrough(&self) -> bool {
        self.index == PASSTHROUGH_STYLE
    }
}

/// Fixed, ordered list of the styles available in a session
///
/// Also owns the swipe arithmetic: style selection moves through the list
/// with wraparound in either direction.
pub struct StyleCatalog {
    styles: Vec<Style>,
}

impl StyleCatalog {
    /// Catalog with the built-in model lineup; entry 0 is passthrough
    pub fn builtin() -> Self {
        Self::from_names(&[
            "none",
            "mosaic",
            "udnie",
            "candy",
            "rain-princess",
            "scream",
        ])
    }

    /// Build a catalog from a name list; the first entry becomes the
    /// passthrough style regardless of its name
    pub fn from_names(names: &[&str]) -> Self {
        let styles = names
            .iter()
            .enumerate()
            .map(|(index, name)| Style {
                index,
                name: name.to_string(),
            })
            .collect();
        Self { styles }
    }

    pub fn get(&self, index: usize) -> Option<&Style> {
        self.styles.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.styles.iter().position(|style| style.name == name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter()
    }

    /// Next style index, wrapping past the end.
    ///
    /// An empty catalog has nowhere to move; the index comes back unchanged.
    pub fn next_index(&self, index: usize) -> usize {
        if self.styles.is_empty() {
            return index;
        }
        (index + 1) % self.styles.len()
    }

    /// Previous style index, wrapping below zero
    pub fn prev_index(&self, index: usize) -> usize {
        if self.styles.is_empty() {
            return index;
        }
        if index == 0 {
            self.styles.len() - 1
        } else {
            index - 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = StyleCatalog::builtin();
        assert!(catalog.len() >= 2);
        assert!(catalog.get(0).unwrap().is_passthrough());
        assert!(!catalog.get(1).unwrap().is_passthrough());
    }

    #[test]
    fn test_index_of() {
        let catalog = StyleCatalog::builtin();
        assert_eq!(catalog.index_of("none"), Some(0));
        assert_eq!(catalog.index_of("mosaic"), Some(1));
        assert_eq!(catalog.index_of("does-not-exist"), None);
    }

    #[test]
    fn test_empty_catalog_swipes_are_inert() {
        let catalog = StyleCatalog::from_names(&[]);
        assert!(catalog.is_empty());
        assert_eq!(catalog.next_index(0), 0);
        assert_eq!(catalog.prev_index(0), 0);
        assert_eq!(catalog.next_index(3), 3);
    }

    #[test]
    fn test_swipe_wraparound() {
        let catalog = StyleCatalog::from_names(&["none", "a", "b"]);

        assert_eq!(catalog.next_index(0), 1);
        assert_eq!(catalog.next_index(2), 0);
        assert_eq!(catalog.prev_index(0), 2);
        assert_eq!(catalog.prev_index(1), 0);

        // A full lap in either direction returns to the start
        let mut index = 0;
        for _ in 0..catalog.len() {
            index = catalog.next_index(index);
        }
        assert_eq!(index, 0);
    }
}
