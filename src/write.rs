//! Templating, minifying, and writing pages to disk.

use crate::minify::minify;
use crate::nav::Navigation;
use gtmpl::{Context, Template, Value};
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The per-page variables substituted into the template.
pub struct PageContent<'a> {
    /// Substituted for `{{.title}}`, typically the document title.
    pub title: &'a str,

    /// Substituted for `{{.header}}`, typically the visible page heading.
    pub header: &'a str,

    /// The rendered HTML body, substituted for `{{.body}}`.
    pub body: &'a str,
}

/// Applies the shared template to pages and writes the results to disk. Every
/// page is rendered with the same [`Navigation`], available to the template as
/// `{{.posts}}`.
pub struct Writer<'a> {
    /// The template for every page, index and posts alike.
    pub template: &'a Template,

    /// The complete navigation list.
    pub navigation: &'a Navigation,

    /// Whether rendered pages are minified before they're written.
    pub minify: bool,
}

impl Writer<'_> {
    /// Renders a page to bytes: executes the template with `page` and the
    /// navigation, then minifies the result.
    pub fn render_page(&self, page: &PageContent) -> Result<Vec<u8>> {
        let context = Context::from(self.page_value(page)).map_err(Error::Template)?;
        let mut rendered: Vec<u8> = Vec::new();
        self.template
            .execute(&mut rendered, &context)
            .map_err(Error::Template)?;
        Ok(minify(&rendered, self.minify).into_owned())
    }

    /// Renders a page and writes it to `file_path`, replacing any existing
    /// file.
    pub fn write_page(&self, page: &PageContent, file_path: &Path) -> Result<()> {
        let html = self.render_page(page)?;
        fs::write(file_path, html).map_err(|err| Error::Io {
            path: file_path.to_owned(),
            err,
        })?;
        info!("wrote {}", file_path.display());
        Ok(())
    }

    /// Converts a page into a [`Value::Object`] with the fields `title`,
    /// `header`, `body`, and `posts`.
    fn page_value(&self, page: &PageContent) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), Value::String(page.title.to_owned()));
        m.insert("header".to_owned(), Value::String(page.header.to_owned()));
        m.insert("body".to_owned(), Value::String(page.body.to_owned()));
        m.insert("posts".to_owned(), Value::from(self.navigation));
        Value::Object(m)
    }
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug, Error)]
pub enum Error {
    /// An error during templating.
    #[error("executing template: {0}")]
    Template(String),

    /// An error writing the output file.
    #[error("writing `{}`: {err}", path.display())]
    Io { path: PathBuf, err: std::io::Error },
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::nav::NavEntry;

    const TEMPLATE: &str = "<html>\n  <head><title>{{.title}}</title></head>\n  <body>\n    \
        <ul>{{range .posts}}<li><a href=\"{{.url}}\">{{.title}}</a></li>{{end}}</ul>\n    \
        <header>{{.header}}</header>\n    <main>{{.body}}</main>\n  </body>\n</html>\n";

    fn template() -> Template {
        let mut template = Template::default();
        template.parse(TEMPLATE).unwrap();
        template
    }

    fn navigation() -> Navigation {
        vec![
            NavEntry {
                url: "./first.html".to_owned(),
                title: "First".to_owned(),
            },
            NavEntry {
                url: "./second.html".to_owned(),
                title: "Second".to_owned(),
            },
        ]
        .into_iter()
        .collect()
    }

    const PAGE: PageContent<'static> = PageContent {
        title: "First",
        header: "First header",
        body: "<p>Body <b>text</b></p>",
    };

    #[test]
    fn test_render_page_unminified() -> Result<()> {
        let template = template();
        let navigation = navigation();
        let writer = Writer {
            template: &template,
            navigation: &navigation,
            minify: false,
        };

        let html = String::from_utf8(writer.render_page(&PAGE)?).unwrap();
        assert!(html.contains("<title>First</title>"), "{}", html);
        assert!(html.contains("<header>First header</header>"), "{}", html);
        assert!(html.contains("<main><p>Body <b>text</b></p></main>"), "{}", html);
        assert!(html.contains(
            "<ul><li><a href=\"./first.html\">First</a></li>\
             <li><a href=\"./second.html\">Second</a></li></ul>"
        ));
        assert!(html.contains("\n    "));
        Ok(())
    }

    #[test]
    fn test_render_page_minified() -> Result<()> {
        let template = template();
        let navigation = navigation();
        let writer = Writer {
            template: &template,
            navigation: &navigation,
            minify: true,
        };

        let html = String::from_utf8(writer.render_page(&PAGE)?).unwrap();
        assert!(!html.contains("\n    "), "{}", html);
        assert!(html.contains("<b>text</b>"), "{}", html);
        assert!(html.contains("./second.html"), "{}", html);
        assert!(html.contains(">Second</a>"), "{}", html);
        Ok(())
    }

    #[test]
    fn test_write_page() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let template = template();
        let navigation = navigation();
        let writer = Writer {
            template: &template,
            navigation: &navigation,
            minify: true,
        };

        let path = dir.path().join("first.html");
        fs::write(&path, "stale").unwrap();
        writer.write_page(&PAGE, &path)?;

        let written = fs::read(&path).unwrap();
        assert_eq!(writer.render_page(&PAGE)?, written);
        Ok(())
    }

    #[test]
    fn test_write_page_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let template = template();
        let navigation = navigation();
        let writer = Writer {
            template: &template,
            navigation: &navigation,
            minify: true,
        };

        let path = dir.path().join("missing").join("first.html");
        match writer.write_page(&PAGE, &path) {
            Err(Error::Io { path: p, .. }) => assert_eq!(path, p),
            other => panic!("wanted Error::Io, got {:?}", other),
        }
    }
}
