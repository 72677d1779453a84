//! Markdown to HTML conversion for page bodies.

pub use crate::htmlrenderer::RawHtml;
use crate::htmlrenderer::push_html;
use pulldown_cmark::{Options, Parser};
use std::io;

/// Converts `markdown` to HTML, appending the result to `out`. Embedded HTML is
/// handled according to `raw_html`: posts use [`RawHtml::Passthrough`] and the
/// index page uses [`RawHtml::Escape`].
pub fn to_html(out: &mut String, markdown: &str, raw_html: RawHtml) -> io::Result<()> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    push_html(out, Parser::new_ext(markdown, options), raw_html)
}
