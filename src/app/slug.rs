/// Turn arbitrary label text into an identifier-safe token.
///
/// Lowercases the input and collapses every run of whitespace or punctuation
/// into a single `-`. Leading and trailing separators are dropped, so the
/// result is stable under repeated application.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_sep = false;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            // lowercasing can expand into combining marks; keep only the
            // alphanumeric part of the expansion
            for lower in c.to_lowercase() {
                if lower.is_alphanumeric() {
                    out.push(lower);
                }
            }
        } else {
            pending_sep = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases() {
        assert_eq!(slugify("Europe"), "europe");
        assert_eq!(slugify("ASIA"), "asia");
    }

    #[test]
    fn test_slugify_collapses_punctuation_and_whitespace() {
        assert_eq!(slugify("N.Amer"), "n-amer");
        assert_eq!(slugify("Mid.Amer"), "mid-amer");
        assert_eq!(slugify("  a   b\t c "), "a-b-c");
        assert_eq!(slugify("a...b"), "a-b");
    }

    #[test]
    fn test_slugify_drops_combining_marks_from_lowercasing() {
        // 'İ' lowercases to "i" plus a combining dot; the mark must not leak
        assert_eq!(slugify("İstanbul"), "istanbul");
    }

    #[test]
    fn test_slugify_charset() {
        for input in ["N.Amer", "Hello, World!", "__x__", "Ünïcode Läbel", "İstanbul"] {
            let slug = slugify(input);
            assert!(
                slug.chars().all(|c| c == '-' || (c.is_alphanumeric() && !c.is_uppercase())),
                "unexpected char in slug {slug:?}"
            );
            assert!(!slug.starts_with('-'));
            assert!(!slug.ends_with('-'));
        }
    }

    #[test]
    fn test_slugify_idempotent() {
        for input in ["N.Amer", "Mid.Amer", "Hello, World!", "", "---", "a b c", "İstanbul"] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_slugify_distinct_for_dataset_regions() {
        let regions = ["N.Amer", "Europe", "Asia", "S.Amer", "Oceania", "Africa", "Mid.Amer"];
        let slugs: Vec<String> = regions.iter().map(|r| slugify(r)).collect();
        for (i, a) in slugs.iter().enumerate() {
            for b in slugs.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
