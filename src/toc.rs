//! GitHub-flavored markdown anchor/slug generation for the module index.

/// Generate a markdown link to the heading with the given text.
pub fn render_toc_link(text: &str) -> String {
    format!("[{}](#{})", text, github_slug(text))
}

/// GitHub heading anchor slug generation.
///
/// - lowercase
/// - keep alphanumerics, spaces, hyphens and underscores, drop everything else
/// - replace spaces with hyphens
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
            slug.push(c);
        }
        // All other chars (including ':' and '.') are stripped
    }
    slug.replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_simple() {
        assert_eq!(github_slug("hello world"), "hello-world");
    }

    #[test]
    fn slug_module_path() {
        assert_eq!(github_slug("strings::util"), "stringsutil");
        assert_eq!(github_slug("mappings::order-lines"), "mappingsorder-lines");
    }

    #[test]
    fn slug_underscore() {
        assert_eq!(github_slug("common::string_utils"), "commonstring_utils");
    }

    #[test]
    fn slug_uppercase() {
        assert_eq!(github_slug("Common Utils"), "common-utils");
    }

    #[test]
    fn toc_link_module() {
        assert_eq!(
            render_toc_link("strings::util"),
            "[strings::util](#stringsutil)"
        );
    }
}
