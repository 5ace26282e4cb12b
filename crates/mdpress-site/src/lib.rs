//! Static page generation for mdpress.
//!
//! Turns a content directory of markdown files into HTML pages:
//! - [`SiteBuilder`] runs a full build (static assets, then every page)
//! - [`generate_page`] renders a single markdown file through a [`PageTemplate`]
//! - [`copy_static`] mirrors the static asset directory into the output
//!
//! Page paths mirror the content tree: `content/blog/post.md` becomes
//! `public/blog/post.html`.

mod assets;
mod builder;
mod page;
mod scanner;

pub use assets::copy_static;
pub use builder::{BuildConfig, BuildError, BuildSummary, SiteBuilder};
pub use page::{PageError, PageTemplate, extract_title, generate_page, render_page};
pub use scanner::{PageRef, Scanner};
