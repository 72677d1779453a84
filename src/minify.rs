//! HTML minification for rendered pages.

use std::borrow::Cow;

/// Minifies a rendered page. Returns `Cow::Borrowed` if minification is
/// disabled, `Cow::Owned` otherwise.
pub fn minify(html: &[u8], enabled: bool) -> Cow<'_, [u8]> {
    match enabled {
        false => Cow::Borrowed(html),
        true => Cow::Owned(minify_html_inner(html)),
    }
}

/// Minify HTML content using the `minify_html` crate. Closing tags are kept so
/// that post bodies keep their structure (e.g., `<h1>Hi</h1>`).
fn minify_html_inner(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_minify_removes_whitespace() {
        let html = b"<html>\n  <head>\n  </head>\n  <body>\n    <h1>Hi</h1>\n  </body>\n</html>";
        let result = minify(html, true);
        let result = String::from_utf8_lossy(&result);

        assert!(!result.contains("\n  "));
        assert!(result.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn test_minify_preserves_text() {
        let html = b"<p>Hello World, this is plain text.</p>";
        let result = minify(html, true);
        assert!(String::from_utf8_lossy(&result).contains("Hello World, this is plain text."));
    }

    #[test]
    fn test_minify_drops_comments() {
        let html = b"<div><!-- note --><p>kept</p></div>";
        let result = minify(html, true);
        let result = String::from_utf8_lossy(&result);
        assert!(!result.contains("note"));
        assert!(result.contains("<p>kept</p>"));
    }

    #[test]
    fn test_minify_disabled() {
        let html = b"<html>\n  <body>\n  </body>\n</html>";
        let result = minify(html, false);

        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, &html[..]);
    }

    #[test]
    fn test_minify_is_deterministic() {
        let html = b"<ul>\n  <li><a href=\"./a.html\">A</a></li>\n  <li><a href=\"./b.html\">B</a></li>\n</ul>";
        assert_eq!(minify(html, true), minify(html, true));
    }
}
