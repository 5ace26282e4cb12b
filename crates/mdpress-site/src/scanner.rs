//! Page discovery by filesystem walking.
//!
//! The scanner only identifies which markdown files become pages and where
//! each page is written. No content is read at this stage.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A markdown source and the HTML file generated from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    /// Markdown source file.
    pub source: PathBuf,
    /// Output HTML file.
    pub dest: PathBuf,
}

/// Discovers pages by walking the content directory.
///
/// Every `.md` file (extension matched case-insensitively) maps to the same
/// relative path under the output directory with an `.html` extension.
/// Hidden files and directories are skipped.
pub struct Scanner {
    content_dir: PathBuf,
    output_dir: PathBuf,
}

impl Scanner {
    #[must_use]
    pub fn new(content_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            content_dir,
            output_dir,
        }
    }

    /// Scan the content directory.
    ///
    /// Pages are returned in path order.
    pub fn scan(&self) -> io::Result<Vec<PageRef>> {
        let mut refs = Vec::new();
        self.scan_directory(&self.content_dir, &self.output_dir, &mut refs)?;
        Ok(refs)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        dest_dir: &Path,
        refs: &mut Vec<PageRef>,
    ) -> io::Result<()> {
        let mut entries = fs::read_dir(dir_path)?.collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            if entry.file_type()?.is_dir() {
                self.scan_directory(&path, &dest_dir.join(&name), refs)?;
            } else if is_markdown(&path) {
                refs.push(PageRef {
                    dest: dest_dir.join(&name).with_extension("html"),
                    source: path,
                });
            } else {
                tracing::debug!(path = %path.display(), "Skipping non-markdown file");
            }
        }

        Ok(())
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}
