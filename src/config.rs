//! Resolves the inputs and outputs of a build. A project may carry a
//! `quire.yaml` file; every key in it is optional and every path is relative to
//! the directory holding the file. Without a project file the conventional
//! layout is assumed:
//!
//! ```text
//! blog.tmp.html      the page template
//! Index.md           the home page
//! posts/*.md         one file per post
//! build/             the output directory
//! ```

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const PROJECT_FILE: &str = "quire.yaml";

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Project {
    template: PathBuf,
    index: PathBuf,
    posts_directory: PathBuf,
    output_directory: PathBuf,
    minify: bool,
    index_title: String,
    index_header: String,
}

impl Default for Project {
    fn default() -> Self {
        Project {
            template: PathBuf::from("blog.tmp.html"),
            index: PathBuf::from("Index.md"),
            posts_directory: PathBuf::from("posts"),
            output_directory: PathBuf::from("build"),
            minify: true,
            index_title: String::from("Home"),
            index_header: String::from("Welcome"),
        }
    }
}

/// The fully resolved settings for a build.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub template: PathBuf,
    pub index: PathBuf,
    pub posts_directory: PathBuf,
    pub output_directory: PathBuf,
    pub minify: bool,
    pub index_title: String,
    pub index_header: String,
}

impl Config {
    /// Looks for a [`PROJECT_FILE`] in `dir` and then in each of its parents.
    /// The search runs on the canonical path so that e.g. `.` still reaches
    /// the real parent directories. If none is found, the default layout
    /// rooted at `dir` is used.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let resolved = dir
            .canonicalize()
            .with_context(|| format!("Resolving project directory `{}`", dir.display()))?;
        let mut candidate = Some(resolved.as_path());
        while let Some(d) = candidate {
            let path = d.join(PROJECT_FILE);
            if path.is_file() {
                return Config::from_project_file(&path);
            }
            candidate = d.parent();
        }
        Ok(Config::with_root(dir, Project::default()))
    }

    /// Loads a project file. Relative paths in the file are resolved against
    /// the file's directory.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path)
            .with_context(|| format!("Opening project file `{}`", path.display()))?;
        let project: Project = serde_yaml::from_reader(file)
            .with_context(|| format!("Loading configuration `{}`", path.display()))?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => Ok(Config::with_root(project_root, project)),
        }
    }

    /// Applies command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&mut self, output_directory: Option<PathBuf>, no_minify: bool) {
        if let Some(output_directory) = output_directory {
            self.output_directory = output_directory;
        }
        if no_minify {
            self.minify = false;
        }
    }

    /// The default layout rooted at `dir`, ignoring any project file.
    pub fn default_for(dir: &Path) -> Config {
        Config::with_root(dir, Project::default())
    }

    fn with_root(root: &Path, project: Project) -> Config {
        Config {
            template: root.join(project.template),
            index: root.join(project.index),
            posts_directory: root.join(project.posts_directory),
            output_directory: root.join(project.output_directory),
            minify: project.minify,
            index_title: project.index_title,
            index_header: project.index_header,
        }
    }
}
