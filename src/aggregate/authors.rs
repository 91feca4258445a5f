//! Author frequency on the "read" shelf.

use super::Aggregate;
use crate::core::Table;

const READ_SHELF: &str = "read";

/// True when the whole shelf value, trimmed and ASCII case-folded, is `read`.
///
/// A multi-valued field such as `"read, favorites"` does not qualify.
pub fn is_read_shelf(shelf: &str) -> bool {
    shelf.trim().eq_ignore_ascii_case(READ_SHELF)
}

/// Count books per author among rows filed on the "read" shelf.
///
/// Authors are compared by exact string equality. Rows without a shelf or
/// without an author are excluded.
pub fn author_popularity(table: &Table) -> Aggregate<String> {
    table
        .rows()
        .iter()
        .filter(|row| row.exclusive_shelf.as_deref().is_some_and(is_read_shelf))
        .filter_map(|row| row.author.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Row;

    fn book(author: Option<&str>, shelf: Option<&str>) -> Row {
        Row {
            author: author.map(String::from),
            exclusive_shelf: shelf.map(String::from),
            ..Row::default()
        }
    }

    #[test]
    fn test_is_read_shelf_variants() {
        assert!(is_read_shelf("read"));
        assert!(is_read_shelf("  READ "));
        assert!(is_read_shelf("Read"));
        assert!(!is_read_shelf("to-read"));
        assert!(!is_read_shelf("To-Read"));
        assert!(!is_read_shelf("currently-reading"));
        assert!(!is_read_shelf("read, favorites"));
        assert!(!is_read_shelf(""));
    }

    #[test]
    fn test_counts_only_read_shelf() {
        let table = Table::new(vec![
            book(Some("Ursula K. Le Guin"), Some("read")),
            book(Some("Ursula K. Le Guin"), Some(" Read ")),
            book(Some("Ursula K. Le Guin"), Some("To-Read")),
            book(Some("Iain M. Banks"), Some("read")),
            book(Some("Iain M. Banks"), Some(" to-read")),
        ]);
        let authors = author_popularity(&table);
        assert_eq!(authors.len(), 2);
        assert_eq!(authors.get("Ursula K. Le Guin"), 2);
        assert_eq!(authors.get("Iain M. Banks"), 1);
    }

    #[test]
    fn test_author_match_is_exact() {
        let table = Table::new(vec![
            book(Some("Banks"), Some("read")),
            book(Some("banks"), Some("read")),
            book(Some("Banks "), Some("read")),
        ]);
        assert_eq!(author_popularity(&table).len(), 3);
    }

    #[test]
    fn test_missing_shelf_or_author_excluded() {
        let table = Table::new(vec![
            book(Some("Nobody Shelved"), None),
            book(None, Some("read")),
        ]);
        assert!(author_popularity(&table).is_empty());
    }
}
