//! Exports the [`build_site`] function which stitches together the two phases
//! of a build: discovering the posts ([`crate::post`]) and rendering every page
//! through the shared template ([`crate::write`]).

use crate::config::Config;
use crate::markdown::{self, RawHtml};
use crate::post::{self, discover_posts};
use crate::write::{self, PageContent, Writer};
use gtmpl::Template;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The name of the index page inside the output directory.
pub const INDEX_FILE_NAME: &str = "index.html";

/// What a successful build produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    /// The number of posts rendered.
    pub posts: usize,

    /// The number of pages written, posts plus the index.
    pub pages: usize,
}

/// Builds the site described by `config`.
///
/// 1. Loads and parses the template.
/// 2. Discovers every post and builds the navigation list.
/// 3. Renders each post (embedded HTML kept as markup) to
///    `{output_directory}/{slug}.html`.
/// 4. Renders the index (embedded HTML escaped) to
///    `{output_directory}/index.html`.
///
/// The first failure aborts the build; pages written before it are left in
/// place.
pub fn build_site(config: &Config) -> Result<Summary> {
    let template = parse_template(&config.template)?;
    debug!("loaded template {}", config.template.display());

    let (posts, navigation) = discover_posts(&config.posts_directory)?;

    fs::create_dir_all(&config.output_directory).map_err(|err| Error::CreateOutputDirectory {
        path: config.output_directory.clone(),
        err,
    })?;

    let writer = Writer {
        template: &template,
        navigation: &navigation,
        minify: config.minify,
    };

    for post in &posts {
        let body = render_markdown(&post.source_path, &post.content, RawHtml::Passthrough)?;
        writer.write_page(
            &PageContent {
                title: &post.title,
                header: &post.title,
                body: &body,
            },
            &config.output_directory.join(post.file_name()),
        )?;
    }

    let index = fs::read_to_string(&config.index).map_err(|err| Error::ReadIndex {
        path: config.index.clone(),
        err,
    })?;
    let body = render_markdown(&config.index, &index, RawHtml::Escape)?;
    writer.write_page(
        &PageContent {
            title: &config.index_title,
            header: &config.index_header,
            body: &body,
        },
        &config.output_directory.join(INDEX_FILE_NAME),
    )?;

    Ok(Summary {
        posts: posts.len(),
        pages: posts.len() + 1,
    })
}

/// Loads the template file and parses it.
fn parse_template(path: &Path) -> Result<Template> {
    let contents = fs::read_to_string(path).map_err(|err| Error::OpenTemplateFile {
        path: path.to_owned(),
        err,
    })?;

    let mut template = Template::default();
    template
        .parse(contents)
        .map_err(|err| Error::ParseTemplate {
            path: path.to_owned(),
            err,
        })?;
    Ok(template)
}

fn render_markdown(path: &Path, source: &str, raw_html: RawHtml) -> Result<String> {
    let mut body = String::new();
    markdown::to_html(&mut body, source, raw_html).map_err(|err| Error::Markdown {
        path: path.to_owned(),
        err,
    })?;
    Ok(body)
}

/// The result of a fallible build.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during discovery, writing,
/// parsing the template, and other I/O.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned for errors discovering posts.
    #[error(transparent)]
    Post(#[from] post::Error),

    /// Returned for errors templating or writing pages.
    #[error(transparent)]
    Write(#[from] write::Error),

    /// Returned for I/O problems while opening the template file.
    #[error("opening template file `{}`: {err}", path.display())]
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing the template file.
    #[error("parsing template file `{}`: {err}", path.display())]
    ParseTemplate { path: PathBuf, err: String },

    /// Returned for I/O problems while reading the index page source.
    #[error("reading index `{}`: {err}", path.display())]
    ReadIndex { path: PathBuf, err: std::io::Error },

    /// Returned when a Markdown source can't be converted.
    #[error("rendering `{}`: {err}", path.display())]
    Markdown { path: PathBuf, err: std::io::Error },

    /// Returned when the output directory can't be created.
    #[error("creating output directory `{}`: {err}", path.display())]
    CreateOutputDirectory { path: PathBuf, err: std::io::Error },
}
