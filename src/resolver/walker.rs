use crate::error::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of directory listings for the resolver
pub trait DirectoryWalker: Send + Sync {
    /// Every file beneath `dir`, recursively
    ///
    /// A path that does not exist or is not a directory has no files.
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

impl<W: DirectoryWalker + ?Sized> DirectoryWalker for &W {
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        (**self).list_files(dir)
    }
}

/// Walks the local filesystem
///
/// Symbolic links are listed as entries and never followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWalker;

impl FsWalker {
    fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                Self::walk(&entry.path(), files)?;
            } else {
                files.push(entry.path());
            }
        }
        Ok(())
    }
}

impl DirectoryWalker for FsWalker {
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        // relative search paths resolve against the working directory
        let start = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };

        if !start.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        match Self::walk(start, &mut files) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        }
        files.sort();
        Ok(files)
    }
}

/// Mock walker returning a fixed listing for any directory
pub struct MockWalker {
    files: Vec<PathBuf>,
    scans: AtomicUsize,
}

impl MockWalker {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        MockWalker {
            files: files.into_iter().map(Into::into).collect(),
            scans: AtomicUsize::new(0),
        }
    }

    /// Number of listings served so far
    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

impl Default for MockWalker {
    fn default() -> Self {
        Self::new(Vec::<PathBuf>::new())
    }
}

impl DirectoryWalker for MockWalker {
    fn list_files(&self, _dir: &Path) -> Result<Vec<PathBuf>> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        Ok(self.files.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_walker_recurses() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
        fs::write(dir.path().join("top.zip"), b"").unwrap();
        fs::write(dir.path().join("nested/deeper/inner.zip"), b"").unwrap();

        let files = FsWalker.list_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![
                dir.path().join("nested/deeper/inner.zip"),
                dir.path().join("top.zip"),
            ]
        );
    }

    #[test]
    fn test_fs_walker_missing_directory() {
        let dir = TempDir::new().unwrap();
        let files = FsWalker.list_files(&dir.path().join("absent")).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_fs_walker_regular_file_has_no_listing() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("server-rhel6");
        fs::write(&file, b"").unwrap();

        assert!(FsWalker.list_files(&file).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_walker_lists_symlinks_without_following() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("rpm/6.12.0")).unwrap();
        fs::write(dir.path().join("rpm/6.12.0/gp.rpm"), b"").unwrap();
        std::os::unix::fs::symlink(dir.path().join("rpm/6.12.0"), dir.path().join("rpm/latest"))
            .unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("rpm/loop")).unwrap();

        let files = FsWalker.list_files(&dir.path().join("rpm")).unwrap();
        assert_eq!(
            files,
            vec![
                dir.path().join("rpm/6.12.0/gp.rpm"),
                dir.path().join("rpm/latest"),
                dir.path().join("rpm/loop"),
            ]
        );
    }

    #[test]
    fn test_mock_walker_counts_scans() {
        let walker = MockWalker::new(["a/b.zip"]);
        assert_eq!(walker.list_files(Path::new("a")).unwrap(), vec![PathBuf::from("a/b.zip")]);
        assert_eq!(walker.scans(), 1);
    }
}
