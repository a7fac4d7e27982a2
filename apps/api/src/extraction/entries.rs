/// Entries whose trimmed text is this short or shorter are treated as noise
/// (stray heading fragments, page numbers).
pub const MIN_ENTRY_CHARS: usize = 20;

/// Splits a section block into entries at blank lines, preserving order.
pub fn split_entries(block: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in block.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                entries.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        entries.push(current.join("\n"));
    }

    entries
        .into_iter()
        .filter(|entry| entry.trim().chars().count() > MIN_ENTRY_CHARS)
        .collect()
}

/// Non-blank trimmed lines of one entry.
pub fn entry_lines(entry: &str) -> Vec<&str> {
    entry
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_blank_lines_in_order() {
        let block = "Senior Software Engineer\nTech Corp Inc.\n\n   \nJunior Developer at Startup LLC";
        assert_eq!(
            split_entries(block),
            vec![
                "Senior Software Engineer\nTech Corp Inc.",
                "Junior Developer at Startup LLC"
            ]
        );
    }

    #[test]
    fn test_short_entries_are_dropped() {
        let block = "Page 2\n\nStaff Engineer, Example Corporation";
        assert_eq!(split_entries(block), vec!["Staff Engineer, Example Corporation"]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let exactly_twenty = "a".repeat(MIN_ENTRY_CHARS);
        assert!(split_entries(&exactly_twenty).is_empty());
        let twenty_one = "a".repeat(MIN_ENTRY_CHARS + 1);
        assert_eq!(split_entries(&twenty_one).len(), 1);
    }

    #[test]
    fn test_lines_are_trimmed() {
        let entries = split_entries("   Principal Engineer   \n    Acme Widgets Ltd   ");
        assert_eq!(entries, vec!["Principal Engineer\nAcme Widgets Ltd"]);
    }

    #[test]
    fn test_empty_block() {
        assert!(split_entries("").is_empty());
        assert!(entry_lines("").is_empty());
    }
}
