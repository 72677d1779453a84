//! Defines the [`Post`] type and the discovery phase of a build: listing the
//! Markdown sources in the posts directory, deriving each post's title and
//! slug, and assembling the [`Navigation`] that every page is rendered with.
//! Discovery always completes before any page is rendered, so every page sees
//! the full navigation list.

use crate::nav::{NavEntry, Navigation};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const MARKDOWN_EXTENSION: &str = ".md";
const HTML_EXTENSION: &str = ".html";

/// A single blog post, read from one Markdown source file.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    /// The file name of the source without its directory and extension, case
    /// preserved (e.g., `Hello World` for `posts/Hello World.md`).
    pub title: String,

    /// The output file's base name. See [`derive_slug`].
    pub slug: String,

    /// The Markdown source file.
    pub source_path: PathBuf,

    /// The raw Markdown contents of the source file.
    pub content: String,
}

impl Post {
    /// The name of the output file, relative to the output directory (e.g.,
    /// `hello_world.html`).
    pub fn file_name(&self) -> String {
        format!("{}{}", self.slug, HTML_EXTENSION)
    }

    /// The link used for this post in the navigation list (e.g.,
    /// `./hello_world.html`).
    pub fn url(&self) -> String {
        format!("./{}", self.file_name())
    }

    /// The navigation entry pointing at this post.
    pub fn nav_entry(&self) -> NavEntry {
        NavEntry {
            url: self.url(),
            title: self.title.clone(),
        }
    }
}

/// Derives the slug for a post title: spaces become underscores and the result
/// is lowercased. `Hello World` becomes `hello_world`.
pub fn derive_slug(title: &str) -> String {
    title.replace(' ', "_").to_lowercase()
}

/// The result of discovery: the posts in discovery order and the navigation
/// list built from them (same order).
pub type Posts = (Vec<Post>, Navigation);

/// Lists the Markdown files (extension `.md`) directly inside
/// `posts_directory` and reads each into a [`Post`]. Subdirectories and hidden
/// files are skipped. Posts are returned ordered by file name so that repeated
/// builds of the same sources produce the same navigation.
///
/// Two source files whose titles derive the same slug (e.g., `Hello World.md`
/// and `Hello_World.md`) would overwrite each other's output, so discovery
/// fails with [`Error::SlugCollision`] instead.
pub fn discover_posts(posts_directory: &Path) -> Result<Posts> {
    let mut posts = Vec::new();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    let walker = WalkDir::new(posts_directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()));

    for result in walker {
        let entry = result.map_err(|err| Error::Walk {
            path: posts_directory.to_owned(),
            err,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if file_name.starts_with('.') || !file_name.ends_with(MARKDOWN_EXTENSION) {
            continue;
        }

        let post = read_post(entry.path())?;
        if let Some(first) = seen.insert(post.slug.clone(), post.source_path.clone()) {
            return Err(Error::SlugCollision {
                slug: post.slug,
                first,
                second: post.source_path,
            });
        }

        debug!("discovered `{}` -> {}", post.title, post.file_name());
        posts.push(post);
    }

    let navigation = posts.iter().map(Post::nav_entry).collect();
    Ok((posts, navigation))
}

/// Reads a single post from its source file. The title is the file stem and
/// must be valid UTF-8.
fn read_post(source_path: &Path) -> Result<Post> {
    let title = source_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| Error::InvalidFileName(source_path.to_owned()))?
        .to_owned();

    let content = fs::read_to_string(source_path).map_err(|err| Error::Read {
        path: source_path.to_owned(),
        err,
    })?;

    Ok(Post {
        slug: derive_slug(&title),
        title,
        source_path: source_path.to_owned(),
        content,
    })
}

/// Represents the result of a discovery operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error discovering or reading posts.
#[derive(Debug, Error)]
pub enum Error {
    /// Returned when the posts directory can't be listed.
    #[error("listing posts directory `{}`: {err}", path.display())]
    Walk { path: PathBuf, err: walkdir::Error },

    /// Returned when a post source file can't be read.
    #[error("reading post `{}`: {err}", path.display())]
    Read { path: PathBuf, err: std::io::Error },

    /// Returned when a post's file name isn't valid UTF-8.
    #[error("invalid file name: {0:?}")]
    InvalidFileName(PathBuf),

    /// Returned when two source files derive the same slug.
    #[error(
        "posts `{}` and `{}` both render to `{slug}.html`",
        first.display(),
        second.display()
    )]
    SlugCollision {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs::{create_dir, write};

    #[test]
    fn test_derive_slug() {
        assert_eq!("hello_world", derive_slug("Hello World"));
        assert_eq!("already_slugged", derive_slug("already_slugged"));
        assert_eq!("a__b", derive_slug("A  B"));
        assert_eq!("café_notes", derive_slug("Café Notes"));
    }

    #[test]
    fn test_post_urls() {
        let post = Post {
            title: String::from("Hello World"),
            slug: derive_slug("Hello World"),
            source_path: PathBuf::from("posts/Hello World.md"),
            content: String::from("# Hi"),
        };
        assert_eq!("hello_world.html", post.file_name());
        assert_eq!("./hello_world.html", post.url());
        assert_eq!(
            NavEntry {
                url: String::from("./hello_world.html"),
                title: String::from("Hello World"),
            },
            post.nav_entry()
        );
    }

    #[test]
    fn test_discover_posts() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path().join("Hello World.md"), "# Hi").unwrap();
        write(dir.path().join("Another Post.md"), "Body").unwrap();
        write(dir.path().join("notes.txt"), "not a post").unwrap();
        write(dir.path().join(".draft.md"), "hidden").unwrap();
        create_dir(dir.path().join("folder.md")).unwrap();

        let (posts, navigation) = discover_posts(dir.path())?;

        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(vec!["Another Post", "Hello World"], titles);
        assert_eq!("# Hi", posts[1].content);
        assert_eq!(dir.path().join("Hello World.md"), posts[1].source_path);

        let urls: Vec<&str> = navigation.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(vec!["./another_post.html", "./hello_world.html"], urls);
        Ok(())
    }

    #[test]
    fn test_discover_posts_dotted_file_name() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path().join("v1.2 notes.md"), "Release notes").unwrap();

        let (posts, navigation) = discover_posts(dir.path())?;
        assert_eq!("v1.2 notes", posts[0].title);
        assert_eq!("v1.2_notes", posts[0].slug);

        let urls: Vec<&str> = navigation.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(vec!["./v1.2_notes.html"], urls);
        Ok(())
    }

    #[test]
    fn test_discover_posts_empty_directory() -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let (posts, navigation) = discover_posts(dir.path())?;
        assert!(posts.is_empty());
        assert!(navigation.is_empty());
        Ok(())
    }

    #[test]
    fn test_discover_posts_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        match discover_posts(&dir.path().join("missing")) {
            Err(Error::Walk { path, .. }) => assert_eq!(dir.path().join("missing"), path),
            other => panic!("wanted Error::Walk, got {:?}", other),
        }
    }

    #[test]
    fn test_discover_posts_slug_collision() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path().join("Hello World.md"), "one").unwrap();
        write(dir.path().join("Hello_World.md"), "two").unwrap();

        match discover_posts(dir.path()) {
            Err(Error::SlugCollision {
                slug,
                first,
                second,
            }) => {
                assert_eq!("hello_world", slug);
                assert_eq!(dir.path().join("Hello World.md"), first);
                assert_eq!(dir.path().join("Hello_World.md"), second);
            }
            other => panic!("wanted Error::SlugCollision, got {:?}", other),
        }
    }
}
