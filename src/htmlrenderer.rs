//! Implements a custom [`push_html`] so that embedded HTML can either be copied
//! through verbatim or escaped into visible text. Posts are trusted to carry
//! their own markup, but the index page is rendered with its raw HTML escaped.
//! [`pulldown_cmark::html::push_html`] has no such switch.

use pulldown_cmark::escape::{escape_href, escape_html, StrWrite};
use pulldown_cmark::{Alignment, CodeBlockKind, CowStr, Event, LinkType, Tag};
use std::io;

/// What to do with HTML embedded in the Markdown source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawHtml {
    /// Copy embedded HTML into the output as markup.
    Passthrough,

    /// Escape embedded HTML so it shows up as literal text.
    Escape,
}

enum TableState {
    Head,
    Body,
}

/// Renders markdown [`Event`]s into HTML. This is largely modeled after
/// [`pulldown_cmark`]'s private `HtmlWriter` struct.
struct HtmlRenderer {
    raw_html: RawHtml,
    table_alignments: Vec<Alignment>,
    table_state: TableState,
    table_cell_index: usize,

    /// Nesting depth of images being rendered. While it's non-zero, text is
    /// collected into the `alt` attribute and tags are dropped.
    image_depth: usize,

    /// Titles of the images currently open, written once their alt text is
    /// closed.
    image_titles: Vec<String>,
}

impl<'a> HtmlRenderer {
    fn new(raw_html: RawHtml) -> Self {
        HtmlRenderer {
            raw_html,
            table_alignments: Vec::default(),
            table_state: TableState::Head,
            table_cell_index: usize::default(),
            image_depth: 0,
            image_titles: Vec::new(),
        }
    }

    fn on_event<W: StrWrite>(&mut self, w: &mut W, event: Event<'a>) -> io::Result<()> {
        if self.image_depth > 0 {
            return self.on_alt_text_event(w, event);
        }
        match event {
            Event::Start(tag) => self.on_start(w, tag),
            Event::End(tag) => self.on_end(w, tag),
            Event::Code(code) => self.on_code(w, code),
            Event::FootnoteReference(name) => {
                w.write_str(r##"<sup class="footnote-reference"><a href="#"##)?;
                escape_html(&mut *w, &name)?;
                w.write_str(r#"">"#)?;
                escape_html(&mut *w, &name)?;
                w.write_str("</a></sup>")
            }
            Event::HardBreak => w.write_str("<br />"),
            Event::Html(html) => self.on_html(w, html),
            Event::Rule => w.write_str("<hr />"),
            Event::SoftBreak => w.write_str("\n"),
            Event::TaskListMarker(checked) => write!(
                w,
                r#"<input disabled="" type="checkbox" {}/>"#,
                match checked {
                    true => r#"checked="" "#,
                    false => "",
                }
            ),
            Event::Text(text) => escape_html(w, &text),
        }
    }

    // Everything nested inside an image becomes plain alt text.
    fn on_alt_text_event<W: StrWrite>(&mut self, w: &mut W, event: Event<'a>) -> io::Result<()> {
        match event {
            Event::Start(Tag::Image(_, _, title)) => {
                self.image_depth += 1;
                self.image_titles.push(title.to_string());
                Ok(())
            }
            Event::End(Tag::Image(_, _, _)) => {
                self.image_depth -= 1;
                if self.image_depth == 0 {
                    self.close_image(w)
                } else {
                    self.image_titles.pop();
                    Ok(())
                }
            }
            Event::Text(text) | Event::Code(text) | Event::Html(text) => escape_html(w, &text),
            Event::SoftBreak | Event::HardBreak => w.write_str(" "),
            Event::FootnoteReference(name) => {
                w.write_str("[")?;
                escape_html(&mut *w, &name)?;
                w.write_str("]")
            }
            _ => Ok(()),
        }
    }

    fn close_image<W: StrWrite>(&mut self, w: &mut W) -> io::Result<()> {
        let title = self.image_titles.pop().unwrap_or_default();
        if title.is_empty() {
            w.write_str(r#"">"#)
        } else {
            w.write_str(r#"" title=""#)?;
            escape_html(&mut *w, &title)?;
            w.write_str(r#"">"#)
        }
    }

    fn on_start<W: StrWrite>(&mut self, w: &mut W, tag: Tag<'a>) -> io::Result<()> {
        match tag {
            Tag::BlockQuote => w.write_str("<blockquote>"),
            Tag::CodeBlock(kind) => match kind {
                CodeBlockKind::Fenced(info) => {
                    let lang = info.split(' ').next().unwrap_or_default();
                    match lang.is_empty() {
                        true => w.write_str("<pre><code>"),
                        false => {
                            w.write_str(r#"<pre><code class="language-"#)?;
                            escape_html(&mut *w, lang)?;
                            w.write_str(r#"">"#)
                        }
                    }
                }
                CodeBlockKind::Indented => w.write_str("<pre><code>"),
            },
            Tag::Emphasis => w.write_str("<em>"),
            Tag::FootnoteDefinition(name) => {
                w.write_str(r#"<div class="footnote-definition" id=""#)?;
                escape_html(&mut *w, &name)?;
                w.write_str(r#""><sup class="footnote-definition-label">"#)?;
                escape_html(&mut *w, &name)?;
                w.write_str("</sup>")
            }
            Tag::Heading(level) => write!(w, "<h{}>", level),
            Tag::Image(_link_type, dest, title) => {
                w.write_str(r#"<img src=""#)?;
                escape_href(&mut *w, &dest)?;
                w.write_str(r#"" alt=""#)?;
                self.image_depth += 1;
                self.image_titles.push(title.to_string());
                Ok(())
            }
            Tag::Item => w.write_str("<li>"),
            Tag::Link(link_type, dest, title) => {
                w.write_str(r#"<a href=""#)?;
                if let LinkType::Email = link_type {
                    w.write_str("mailto:")?;
                }
                escape_href(&mut *w, &dest)?;
                if !title.is_empty() {
                    w.write_str(r#"" title=""#)?;
                    escape_html(&mut *w, &title)?;
                }
                w.write_str(r#"">"#)
            }
            Tag::List(None) => w.write_str("<ul>"),
            Tag::List(Some(1)) => w.write_str("<ol>"),
            Tag::List(Some(start)) => write!(w, r#"<ol start="{}">"#, start),
            Tag::Paragraph => w.write_str("<p>"),
            Tag::Strikethrough => w.write_str("<del>"),
            Tag::Strong => w.write_str("<strong>"),
            Tag::Table(alignments) => {
                self.table_alignments = alignments;
                w.write_str("<table>")
            }
            Tag::TableHead => {
                self.table_state = TableState::Head;
                self.table_cell_index = 0;
                w.write_str("<thead><tr>")
            }
            Tag::TableRow => {
                self.table_cell_index = 0;
                w.write_str("<tr>")
            }
            Tag::TableCell => write!(
                w,
                "<{}{}>",
                match self.table_state {
                    TableState::Head => "th",
                    TableState::Body => "td",
                },
                match self.table_alignments.get(self.table_cell_index) {
                    Some(Alignment::Left) => r#" align="left""#,
                    Some(Alignment::Right) => r#" align="right""#,
                    Some(Alignment::Center) => r#" align="center""#,
                    _ => "",
                }
            ),
        }
    }

    fn on_end<W: StrWrite>(&mut self, w: &mut W, tag: Tag) -> io::Result<()> {
        match tag {
            Tag::BlockQuote => w.write_str("</blockquote>"),
            Tag::CodeBlock(_) => w.write_str("</code></pre>"),
            Tag::Emphasis => w.write_str("</em>"),
            Tag::FootnoteDefinition(_) => w.write_str("</div>"),
            Tag::Heading(level) => write!(w, "</h{}>", level),
            Tag::Image(_, _, _) => unreachable!("images are closed by on_alt_text_event"),
            Tag::Item => w.write_str("</li>"),
            Tag::Link(_, _, _) => w.write_str("</a>"),
            Tag::List(Some(_)) => w.write_str("</ol>"),
            Tag::List(None) => w.write_str("</ul>"),
            Tag::Paragraph => w.write_str("</p>"),
            Tag::Strikethrough => w.write_str("</del>"),
            Tag::Strong => w.write_str("</strong>"),
            Tag::Table(_) => w.write_str("</tbody></table>"),
            Tag::TableHead => {
                self.table_state = TableState::Body;
                w.write_str("</tr></thead><tbody>")
            }
            Tag::TableRow => w.write_str("</tr>"),
            Tag::TableCell => {
                self.table_cell_index += 1;
                w.write_str(match self.table_state {
                    TableState::Head => "</th>",
                    TableState::Body => "</td>",
                })
            }
        }
    }

    fn on_code<W: StrWrite>(&mut self, w: &mut W, s: CowStr) -> io::Result<()> {
        w.write_str("<code>")?;
        escape_html(&mut *w, &s)?;
        w.write_str("</code>")
    }

    fn on_html<W: StrWrite>(&mut self, w: &mut W, s: CowStr) -> io::Result<()> {
        match self.raw_html {
            RawHtml::Passthrough => w.write_str(&s),
            RawHtml::Escape => escape_html(w, &s),
        }
    }
}

/// Converts [`Event`]s into an HTML string much like
/// `pulldown_cmark::html::push_html`, except that embedded HTML is handled
/// according to `raw_html`.
pub fn push_html<'a, I>(out: &mut String, events: I, raw_html: RawHtml) -> io::Result<()>
where
    I: Iterator<Item = Event<'a>>,
{
    let mut renderer = HtmlRenderer::new(raw_html);
    for event in events {
        renderer.on_event(out, event)?;
    }
    Ok(())
}
