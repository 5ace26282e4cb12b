//! Static site builder.

use std::io;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::assets::{clean_dir, copy_static};
use crate::page::{PageError, PageTemplate, generate_page};
use crate::scanner::{PageRef, Scanner};

/// Configuration for a site build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Markdown sources.
    pub content_dir: PathBuf,
    /// Static assets copied verbatim. Skipped when missing.
    pub static_dir: PathBuf,
    /// Output directory. Deleted and recreated by every build.
    pub output_dir: PathBuf,
    /// Page template file.
    pub template: PathBuf,
    /// URL prefix for root-relative links.
    pub base_path: String,
}

/// Counts reported after a successful build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Pages generated from markdown.
    pub pages: usize,
    /// Static files copied.
    pub assets: usize,
}

/// Error returned by the site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Content directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Failed to read template {}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to generate {}: {source}", path.display())]
    Page {
        path: PathBuf,
        #[source]
        source: PageError,
    },
}

/// Builds a static site from a content directory.
///
/// Static assets are copied first, then every markdown page is rendered.
/// Pages are independent and render in parallel; the first failure aborts
/// the build.
pub struct SiteBuilder {
    config: BuildConfig,
}

impl SiteBuilder {
    #[must_use]
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Run the build.
    pub fn build(&self) -> Result<BuildSummary, BuildError> {
        let config = &self.config;

        if !config.content_dir.is_dir() {
            return Err(BuildError::SourceNotFound(config.content_dir.clone()));
        }

        let template =
            PageTemplate::load(&config.template).map_err(|source| BuildError::Template {
                path: config.template.clone(),
                source,
            })?;

        let assets = if config.static_dir.is_dir() {
            copy_static(&config.static_dir, &config.output_dir)?
        } else {
            tracing::warn!(
                path = %config.static_dir.display(),
                "Static directory not found, skipping assets"
            );
            clean_dir(&config.output_dir)?;
            0
        };

        let pages = Scanner::new(config.content_dir.clone(), config.output_dir.clone()).scan()?;
        tracing::debug!(count = pages.len(), "Discovered pages");

        pages.par_iter().try_for_each(|page| self.generate(page, &template))?;

        let summary = BuildSummary {
            pages: pages.len(),
            assets,
        };
        tracing::info!(pages = summary.pages, assets = summary.assets, "Build complete");
        Ok(summary)
    }

    fn generate(&self, page: &PageRef, template: &PageTemplate) -> Result<(), BuildError> {
        generate_page(&page.source, template, &page.dest, &self.config.base_path).map_err(
            |source| BuildError::Page {
                path: page.source.clone(),
                source,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str =
        r#"<html><head><title>{{ Title }}</title><link href="/index.css"></head><body>{{ Content }}</body></html>"#;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site_config(root: &Path) -> BuildConfig {
        BuildConfig {
            content_dir: root.join("content"),
            static_dir: root.join("static"),
            output_dir: root.join("public"),
            template: root.join("template.html"),
            base_path: "/".to_owned(),
        }
    }

    fn create_site(root: &Path) {
        write(&root.join("template.html"), TEMPLATE);
        write(&root.join("static/index.css"), "body {}");
        write(&root.join("static/images/logo.png"), "png");
        write(&root.join("content/index.md"), "# Home\n\n[Blog](/blog/post)");
        write(
            &root.join("content/blog/post.md"),
            "# Post\n\n> quoted\n\n1. one\n2. two",
        );
    }

    #[test]
    fn test_build_site() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        create_site(root);
        write(&root.join("public/stale.html"), "stale");

        let summary = SiteBuilder::new(site_config(root)).build().unwrap();

        assert_eq!(summary, BuildSummary { pages: 2, assets: 2 });
        assert!(!root.join("public/stale.html").exists());
        assert_eq!(
            fs::read_to_string(root.join("public/index.css")).unwrap(),
            "body {}"
        );
        assert!(root.join("public/images/logo.png").exists());
        assert_eq!(
            fs::read_to_string(root.join("public/index.html")).unwrap(),
            r#"<html><head><title>Home</title><link href="/index.css"></head><body><div><h1>Home</h1><p><a href="/blog/post">Blog</a></p></div></body></html>"#
        );
        assert_eq!(
            fs::read_to_string(root.join("public/blog/post.html")).unwrap(),
            r#"<html><head><title>Post</title><link href="/index.css"></head><body><div><h1>Post</h1><blockquote>quoted</blockquote><ol><li>one</li><li>two</li></ol></div></body></html>"#
        );
    }

    #[test]
    fn test_build_with_base_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        create_site(root);

        let config = BuildConfig {
            base_path: "/repo/".to_owned(),
            ..site_config(root)
        };
        SiteBuilder::new(config).build().unwrap();

        let index = fs::read_to_string(root.join("public/index.html")).unwrap();
        assert!(index.contains(r#"<link href="/repo/index.css">"#));
        assert!(index.contains(r#"<a href="/repo/blog/post">Blog</a>"#));
    }

    #[test]
    fn test_build_without_static_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        create_site(root);
        fs::remove_dir_all(root.join("static")).unwrap();

        let summary = SiteBuilder::new(site_config(root)).build().unwrap();

        assert_eq!(summary, BuildSummary { pages: 2, assets: 0 });
    }

    #[test]
    fn test_build_missing_content_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(&root.join("template.html"), TEMPLATE);

        let err = SiteBuilder::new(site_config(root)).build().unwrap_err();
        assert!(matches!(err, BuildError::SourceNotFound(_)));
    }

    #[test]
    fn test_build_missing_template() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        create_site(root);
        fs::remove_file(root.join("template.html")).unwrap();

        let err = SiteBuilder::new(site_config(root)).build().unwrap_err();
        assert!(matches!(err, BuildError::Template { .. }));
    }

    #[test]
    fn test_build_reports_failing_page() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        create_site(root);
        write(&root.join("content/broken.md"), "# Broken\n\nunclosed _italic");

        let err = SiteBuilder::new(site_config(root)).build().unwrap_err();
        match err {
            BuildError::Page { path, source } => {
                assert_eq!(path, root.join("content/broken.md"));
                assert!(matches!(source, PageError::Markdown(_)));
            }
            other => panic!("Expected BuildError::Page, got {other:?}"),
        }
    }

    #[test]
    fn test_build_page_without_title() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        create_site(root);
        write(&root.join("content/untitled.md"), "no heading here");

        let err = SiteBuilder::new(site_config(root)).build().unwrap_err();
        assert!(err.to_string().contains("No h1 header"));
    }
}
