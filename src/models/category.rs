/// Default category vocabulary offered by the entry form.
pub(crate) const DEFAULT_CATEGORIES: &[&str] = &[
    "salary",
    "food",
    "rent",
    "utilities",
    "entertainment",
    "other",
];

/// Capitalize the first character for display, e.g. `food` -> `Food`.
pub(crate) fn display_name(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Position of `category` in `vocabulary`, case-insensitive.
pub(crate) fn position(vocabulary: &[String], category: &str) -> Option<usize> {
    let lower = category.to_lowercase();
    vocabulary.iter().position(|c| c.to_lowercase() == lower)
}
