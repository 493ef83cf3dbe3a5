//! URL slugs for content paths and heading anchors.

use deunicode::deunicode;

/// Slugify a single path segment or heading text.
///
/// Unicode is transliterated to ASCII, letters are lowercased and every run
/// of other characters collapses into one `-`. Leading and trailing dashes
/// are dropped.
///
/// ```ignore
/// slugify("Hello, World!")  -> "hello-world"
/// slugify("Café au lait")   -> "cafe-au-lait"
/// slugify("2024_recap")     -> "2024-recap"
/// ```
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Slugify each `/`-separated segment of a relative path, dropping empty ones.
pub fn slugify_path(path: &str) -> String {
    path.split(['/', '\\'])
        .map(slugify)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
        assert_eq!(slugify("Café au lait"), "cafe-au-lait");
        assert_eq!(slugify("2024_recap"), "2024-recap");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_slugify_path() {
        assert_eq!(slugify_path("Guides/First Post"), "guides/first-post");
        assert_eq!(slugify_path("a//b/"), "a/b");
    }
}
