//! Text-to-slug transform.
//!
//! Slugs are routing keys and are compared against values already persisted,
//! so the transform must stay exactly: lowercase, every space to `_`, then drop
//! anything that is not an ASCII word character (`[A-Za-z0-9_]`) or `-`.

/// Derive a slug from a display name.
///
/// ```
/// assert_eq!(chamber_core::slugify("Auto Repair Shop"), "auto_repair_shop");
/// assert_eq!(chamber_core::slugify("Café & Bar"), "caf__bar");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Whether `text` is already in slug form (`slugify` would leave it unchanged).
#[must_use]
pub fn is_slug(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Auto Repair Shop", "auto_repair_shop")]
    #[case("", "")]
    #[case("Retail", "retail")]
    #[case("Food & Drink", "food__drink")]
    #[case("  Two  Spaces ", "__two__spaces_")]
    #[case("Health-Care", "health-care")]
    #[case("IT/Tech (Services)", "ittech_services")]
    #[case("Café", "caf")]
    #[case("tab\there", "tabhere")]
    #[case("ABC_123", "abc_123")]
    fn slugify_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[rstest]
    #[case("Auto Repair Shop")]
    #[case("Food & Drink!")]
    #[case("Ünïcödé Námes")]
    #[case("already_a-slug")]
    fn output_is_slug_form_and_idempotent(#[case] input: &str) {
        let once = slugify(input);
        assert!(is_slug(&once), "not slug form: {once}");
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn is_slug_rejects_uppercase_and_spaces() {
        assert!(is_slug("retail"));
        assert!(!is_slug("Retail"));
        assert!(!is_slug("auto repair"));
    }
}
