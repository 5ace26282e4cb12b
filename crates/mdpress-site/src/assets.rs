//! Static asset copying.

use std::fs;
use std::io;
use std::path::Path;

/// Replace `dest` with a recursive copy of `src`.
///
/// Any existing `dest` directory is deleted first. Returns the number of
/// files copied.
pub fn copy_static(src: &Path, dest: &Path) -> io::Result<usize> {
    clean_dir(dest)?;
    copy_dir(src, dest)
}

/// Delete `dir` if it exists and recreate it empty.
pub(crate) fn clean_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        tracing::debug!(path = %dir.display(), "Deleting output directory");
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)
}

fn copy_dir(src: &Path, dest: &Path) -> io::Result<usize> {
    let mut copied = 0;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            fs::create_dir_all(&dest_path)?;
            copied += copy_dir(&src_path, &dest_path)?;
        } else {
            fs::copy(&src_path, &dest_path)?;
            tracing::info!(from = %src_path.display(), to = %dest_path.display(), "Copied asset");
            copied += 1;
        }
    }

    Ok(copied)
}
