/// Case-insensitive substring test.
/// The needle must already be lowercased; callers lowercase the query once
/// and probe many fields with it.
pub fn contains_ignore_case(haystack: &str, lowercase_needle: &str) -> bool {
    if lowercase_needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(lowercase_needle)
}

/// Case-insensitive ordering without allocating lowercased copies.
pub fn cmp_ignore_case(a: &str, b: &str) -> std::cmp::Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Snirkle", "snirk"));
        assert!(contains_ignore_case("SNIRKLE", "irk"));
        assert!(contains_ignore_case("snirkle", ""));
        assert!(!contains_ignore_case("snirkle", "blorp"));
    }

    #[test]
    fn test_cmp_ignore_case() {
        assert_eq!(cmp_ignore_case("apple", "Apple"), Ordering::Equal);
        assert_eq!(cmp_ignore_case("Apple", "banana"), Ordering::Less);
        assert_eq!(cmp_ignore_case("cherry", "Banana"), Ordering::Greater);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Hi", 2), "Hi");
    }
}
