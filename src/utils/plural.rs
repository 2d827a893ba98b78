//! Pluralization for log lines.

/// Return "s" suffix for plural counts
#[inline]
fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "group")` -> `"0 groups"`
/// - `plural_count(1, "district")` -> `"1 district"`
/// - `plural_count(39, "district")` -> `"39 districts"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "group"), "0 groups");
        assert_eq!(plural_count(1, "district"), "1 district");
        assert_eq!(plural_count(39, "district"), "39 districts");
        assert_eq!(plural_count(2, "patch group"), "2 patch groups");
    }
}
