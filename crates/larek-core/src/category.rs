//! Category to CSS modifier mapping for product cards.

/// Block-element name the modifier is appended to.
pub const CATEGORY_BASE_CLASS: &str = "card__category";

/// Known categories and their modifier suffixes.
pub const CATEGORY_CLASS_MAP: [(&str, &str); 5] = [
    ("софт-скил", "_soft"),
    ("хард-скил", "_hard"),
    ("другое", "_other"),
    ("дополнительное", "_additional"),
    ("кнопка", "_button"),
];

const FALLBACK_SUFFIX: &str = "_other";

/// Returns the modifier class for a category, e.g. `card__category_soft`.
///
/// Lookup is case-insensitive; unknown categories get `_other`.
pub fn category_class(category: &str) -> String {
    let key = category.to_lowercase();
    let suffix = CATEGORY_CLASS_MAP
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, suffix)| *suffix)
        .unwrap_or(FALLBACK_SUFFIX);
    format!("{CATEGORY_BASE_CLASS}{suffix}")
}

/// Every modifier class a card may carry, used to clear the previous one.
pub fn all_category_classes() -> impl Iterator<Item = String> {
    CATEGORY_CLASS_MAP
        .iter()
        .map(|(_, suffix)| format!("{CATEGORY_BASE_CLASS}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories() {
        assert_eq!(category_class("софт-скил"), "card__category_soft");
        assert_eq!(category_class("хард-скил"), "card__category_hard");
        assert_eq!(category_class("кнопка"), "card__category_button");
    }

    #[test]
    fn test_case_insensitive_and_fallback() {
        assert_eq!(category_class("Дополнительное"), "card__category_additional");
        assert_eq!(category_class("unknown"), "card__category_other");
        assert_eq!(category_class(""), "card__category_other");
    }

    #[test]
    fn test_all_classes() {
        let classes: Vec<String> = all_category_classes().collect();
        assert_eq!(classes.len(), 5);
        assert!(classes.contains(&"card__category_other".to_string()));
    }
}
