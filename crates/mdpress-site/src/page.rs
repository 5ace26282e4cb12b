//! Single page rendering.

use std::fs;
use std::io;
use std::path::Path;

use mdpress_markdown::{MarkdownError, markdown_to_html_node};

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Error returned when a page cannot be generated.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Markdown(#[from] MarkdownError),
    #[error("No h1 header found in markdown")]
    MissingTitle,
}

/// Extract the page title from the first `# ` line.
///
/// # Examples
///
/// ```
/// use mdpress_site::extract_title;
///
/// assert_eq!(extract_title("intro\n# Hello  \n## Sub"), Some("Hello"));
/// assert_eq!(extract_title("## Only h2"), None);
/// ```
pub fn extract_title(markdown: &str) -> Option<&str> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
}

/// HTML page template with `{{ Title }}` and `{{ Content }}` placeholders.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    source: String,
}

impl PageTemplate {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read a template from disk.
    pub fn load(path: &Path) -> io::Result<Self> {
        Ok(Self::new(fs::read_to_string(path)?))
    }

    /// Fill the placeholders and point root-relative `href`/`src`
    /// attributes at `base_path`.
    #[must_use]
    pub fn render(&self, title: &str, content: &str, base_path: &str) -> String {
        let page = self
            .source
            .replace(TITLE_PLACEHOLDER, title)
            .replace(CONTENT_PLACEHOLDER, content);

        if base_path == "/" {
            page
        } else {
            page.replace(r#"href="/"#, &format!(r#"href="{base_path}"#))
                .replace(r#"src="/"#, &format!(r#"src="{base_path}"#))
        }
    }
}

/// Render a markdown document into a full HTML page.
///
/// # Errors
///
/// Fails if the markdown is malformed or has no `# ` title line.
pub fn render_page(
    markdown: &str,
    template: &PageTemplate,
    base_path: &str,
) -> Result<String, PageError> {
    let content = markdown_to_html_node(markdown)?.render();
    let title = extract_title(markdown).ok_or(PageError::MissingTitle)?;
    Ok(template.render(title, &content, base_path))
}

/// Render the markdown file `from` and write the page to `dest`,
/// creating parent directories as needed.
pub fn generate_page(
    from: &Path,
    template: &PageTemplate,
    dest: &Path,
    base_path: &str,
) -> Result<(), PageError> {
    tracing::debug!(from = %from.display(), dest = %dest.display(), "Generating page");

    let markdown = fs::read_to_string(from)?;
    let html = render_page(&markdown, template, base_path)?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(dest, html)?;

    tracing::info!(path = %dest.display(), "Page generated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = r#"<html><head><title>{{ Title }}</title><link href="/index.css"></head><body>{{ Content }}</body></html>"#;

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title("# Hello"), Some("Hello"));
        assert_eq!(extract_title("text\n\n#   Spaced   \n"), Some("Spaced"));
    }

    #[test]
    fn test_extract_title_ignores_other_levels() {
        assert_eq!(extract_title("## Sub\n### Deeper"), None);
        assert_eq!(extract_title("#NoSpace"), None);
        assert_eq!(extract_title("## Sub\n# Real"), Some("Real"));
    }

    #[test]
    fn test_template_render() {
        let template = PageTemplate::new(TEMPLATE);
        assert_eq!(
            template.render("Home", "<div></div>", "/"),
            r#"<html><head><title>Home</title><link href="/index.css"></head><body><div></div></body></html>"#
        );
    }

    #[test]
    fn test_template_render_base_path() {
        let template = PageTemplate::new(TEMPLATE);
        let page = template.render(
            "Home",
            r#"<div><a href="/blog">b</a><img src="/a.png" alt="a"></img><a href="https://x.dev">x</a></div>"#,
            "/site/",
        );
        assert!(page.contains(r#"<link href="/site/index.css">"#));
        assert!(page.contains(r#"<a href="/site/blog">b</a>"#));
        assert!(page.contains(r#"<img src="/site/a.png" alt="a"></img>"#));
        assert!(page.contains(r#"<a href="https://x.dev">x</a>"#));
    }

    #[test]
    fn test_render_page() {
        let template = PageTemplate::new("<title>{{ Title }}</title>{{ Content }}");
        let page = render_page("# Hi\n\nSome _text_", &template, "/").unwrap();
        assert_eq!(
            page,
            "<title>Hi</title><div><h1>Hi</h1><p>Some <i>text</i></p></div>"
        );
    }

    #[test]
    fn test_render_page_missing_title() {
        let template = PageTemplate::new(TEMPLATE);
        let result = render_page("## Not a title", &template, "/");
        assert!(matches!(result, Err(PageError::MissingTitle)));
    }

    #[test]
    fn test_render_page_malformed_markdown() {
        let template = PageTemplate::new(TEMPLATE);
        let result = render_page("# T\n\nbad `code", &template, "/");
        assert!(matches!(result, Err(PageError::Markdown(_))));
    }

    #[test]
    fn test_generate_page_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let from = temp_dir.path().join("post.md");
        let dest = temp_dir.path().join("out/blog/post.html");
        fs::write(&from, "# Post\n\n- one\n- two").unwrap();

        let template = PageTemplate::new("{{ Title }}|{{ Content }}");
        generate_page(&from, &template, &dest, "/").unwrap();

        assert_eq!(
            fs::read_to_string(&dest).unwrap(),
            "Post|<div><h1>Post</h1><ul><li>one</li><li>two</li></ul></div>"
        );
    }

    #[test]
    fn test_generate_page_missing_source() {
        let temp_dir = tempfile::tempdir().unwrap();
        let template = PageTemplate::new(TEMPLATE);
        let result = generate_page(
            &temp_dir.path().join("missing.md"),
            &template,
            &temp_dir.path().join("out.html"),
            "/",
        );
        assert!(matches!(result, Err(PageError::Io(_))));
    }
}
