use crate::error::{ThemeError, ThemeResult};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Replace `path` with `bytes` through a sibling temp file and a rename.
///
/// Readers observe either the previous content or the new content, never a
/// missing or partially written file. Each call writes its own uniquely named
/// temp file, so concurrent writers do not collide; the last rename wins.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> ThemeResult<()> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent,
        None => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| ThemeError::io(parent, e))?;

    let mut prefix = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    prefix.push(".");
    let mut tmp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| ThemeError::io(parent, e))?;

    tmp.write_all(bytes)
        .map_err(|e| ThemeError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| ThemeError::io(tmp.path(), e))?;

    // a failed persist drops the temp file with the error
    tmp.persist(path).map_err(|e| ThemeError::io(path, e.error))?;

    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_atomic_creates_parent_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        let path = nested.join("themeConfig.json");

        write_atomic(&path, b"[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        assert_eq!(entries(&nested), vec!["themeConfig.json".to_string()]);
    }

    #[test]
    fn test_write_atomic_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        write_atomic(&path, b"first version, longer").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_concurrent_writers_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let path = Arc::new(dir.path().join("themeConfig.json"));

        let writers: Vec<_> = [b"[\"a\"]", b"[\"b\"]"]
            .into_iter()
            .map(|body| {
                let path = Arc::clone(&path);
                thread::spawn(move || {
                    (0..40)
                        .filter(|_| write_atomic(&path, body).is_err())
                        .count()
                })
            })
            .collect();
        let failures: usize = writers.into_iter().map(|w| w.join().unwrap()).sum();

        assert_eq!(failures, 0);
        let content = fs::read_to_string(path.as_ref()).unwrap();
        assert!(content == "[\"a\"]" || content == "[\"b\"]");
        assert_eq!(entries(dir.path()), vec!["themeConfig.json".to_string()]);
    }
}
