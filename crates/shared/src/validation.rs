//! Common validation utilities.

/// Derives a URL-safe slug from a display name.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single hyphen, and trims leading/trailing hyphens. Matches the slug
/// shape the invite URLs expect.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
