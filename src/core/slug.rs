//! Slug derivation for company codes
//!
//! Pure, deterministic mapping from a human-readable name to a URL-safe,
//! lowercase, hyphenated identifier.

/// Utility for deriving URL-safe slugs from human-readable names
pub struct Slugifier;

impl Slugifier {
    /// Convert a name into a slug: lowercase the input, collapse runs of
    /// characters outside `[a-z0-9]` into a single hyphen, and strip any
    /// leading or trailing hyphens.
    ///
    /// # Examples
    ///
    /// ```
    /// use biztime::core::slug::Slugifier;
    ///
    /// assert_eq!(Slugifier::slugify("New Company"), "new-company");
    /// assert_eq!(Slugifier::slugify("Test"), "test");
    /// ```
    pub fn slugify(name: &str) -> String {
        let mut slug = String::with_capacity(name.len());
        let mut pending_hyphen = false;

        for ch in name.chars() {
            let lower = ch.to_ascii_lowercase();
            if lower.is_ascii_alphanumeric() {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(lower);
            } else {
                // Any non-alphanumeric char marks a separator; runs collapse
                // into a single hyphen, inserted lazily before the next
                // alphanumeric so trailing separators are stripped.
                pending_hyphen = true;
            }
        }

        slug
    }
}
