//! Result file writer.
//!
//! The report is written to a temporary file next to the destination and
//! renamed into place once fully flushed. A failed run leaves any existing
//! file at the destination untouched and no partial output behind.

use crate::grouper::Group;
use crate::output::write_report;
use anyhow::{Context, Result};
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write buffer size for the result file.
pub const WRITE_BUFFER_SIZE: usize = 128 * 1024;

/// Write `groups` to `path` in report format. Returns the number of groups written.
///
/// Creates parent directories if needed.
pub fn write_report_file(path: impl AsRef<Path>, groups: &[Group]) -> Result<usize> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
            parent
        }
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("create temporary file in {}", dir.display()))?;
    // Temporary files are owner-only; give the result the usual mode.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .with_context(|| format!("set permissions on {}", tmp.path().display()))?;
    }
    let mut w = BufWriter::with_capacity(WRITE_BUFFER_SIZE, tmp);
    let written =
        write_report(groups, &mut w).with_context(|| format!("write {}", path.display()))?;
    let tmp = w
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("flush {}", path.display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("create {}", path.display()))?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn creates_parent_dirs() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("a").join("b").join("result.txt");
        write_report_file(&path, &[])?;
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn replaces_existing_file() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("sub").join("result.txt");
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(&path, "stale")?;

        assert_eq!(write_report_file(&path, &[])?, 0);
        assert_eq!(fs::read_to_string(&path)?, "0\n\n");
        // Only the result file remains in the directory.
        assert_eq!(fs::read_dir(tmp.path().join("sub"))?.count(), 1);
        Ok(())
    }

    #[test]
    fn unwritable_destination_fails() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "")?;
        // A regular file cannot be a parent directory.
        assert!(write_report_file(blocker.join("out.txt"), &[]).is_err());
        Ok(())
    }
}
