//! The library code for the `quire` static blog builder. A build is two
//! sequential phases:
//!
//! 1. Discovering posts from source files on disk ([`crate::post`]), which also
//!    produces the navigation list ([`crate::nav`]) shared by every page.
//! 2. Rendering every page through the one template and writing it to disk
//!    ([`crate::write`]): each post first, then the index page.
//!
//! Navigation must be complete before anything is rendered, which is why the
//! phases don't interleave. [`crate::build::build_site`] stitches them
//! together.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
mod htmlrenderer;
pub mod logging;
pub mod markdown;
pub mod minify;
pub mod nav;
pub mod post;
pub mod write;
