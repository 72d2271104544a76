//! Sorting and filtering for listing entries.

use crate::fs::entry::Entry;

/// The field by which entries are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Sort alphabetically by name (case-insensitive).
    Name,
    /// Sort by file size in bytes.
    Size,
    /// Sort by last-modified time.
    Date,
}

impl SortField {
    /// Parses a config value (`"name"`, `"size"`, `"date"`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "size" => Some(Self::Size),
            "date" => Some(Self::Date),
            _ => None,
        }
    }
}

/// Sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest / earliest / A–Z first.
    Ascending,
    /// Largest / latest / Z–A first.
    Descending,
}

/// Sorts entries by the given field and direction.
///
/// When `dirs_first` is `true`, directories always appear before files
/// regardless of the sort field. Returns a **new** sorted `Vec<Entry>` —
/// the input slice is never mutated.
pub fn sort_entries(
    entries: &[Entry],
    field: SortField,
    direction: SortDirection,
    dirs_first: bool,
) -> Vec<Entry> {
    let mut sorted: Vec<Entry> = entries.to_vec();

    sorted.sort_by(|a, b| {
        if dirs_first {
            let dir_cmp = b.is_dir().cmp(&a.is_dir());
            if dir_cmp != std::cmp::Ordering::Equal {
                return dir_cmp;
            }
        }

        let ord = match field {
            SortField::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
            SortField::Size => a.size().cmp(&b.size()),
            SortField::Date => a.modified().cmp(&b.modified()),
        };

        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    sorted
}

/// Returns the entries whose names do not start with `.`.
pub fn filter_hidden(entries: &[Entry]) -> Vec<Entry> {
    entries
        .iter()
        .filter(|e| !e.is_hidden())
        .cloned()
        .collect()
}
