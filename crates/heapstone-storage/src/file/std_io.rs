//! File-backed store using standard blocking I/O.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use heapstone_common::HeapstoneResult;

use super::handle::BackingStore;

/// A read-only store over a file on disk.
///
/// The file handle sits behind a mutex so that the seek and the read of one
/// positioned read happen together; independent cursors may share a store.
#[derive(Debug)]
pub struct FileStore {
    /// The underlying file.
    file: Mutex<File>,
    /// The file path.
    path: PathBuf,
}

impl FileStore {
    /// Opens an existing file for reading.
    pub fn open(path: impl AsRef<Path>) -> HeapstoneResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        debug!(path = %path.display(), "opened file store");
        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BackingStore for FileStore {
    fn len(&self) -> HeapstoneResult<u64> {
        let file = self.file.lock();
        Ok(file.metadata()?.len())
    }

    fn read_at(&self, buf: &mut [u8], offset: u64) -> HeapstoneResult<usize> {
        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(offset))?;
        Ok(file.read(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        let err = FileStore::open(dir.path().join("missing.dat")).unwrap_err();
        assert_eq!(err.kind(), heapstone_common::ErrorKind::IoFailure);
    }

    #[test]
    fn test_read_at_offset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offset.dat");
        let data: Vec<u8> = (0..=255u8).collect();
        std::fs::write(&path, &data).unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.path(), path);
        assert_eq!(store.len().unwrap(), 256);

        let mut buf = [0u8; 16];
        assert_eq!(store.fill_at(&mut buf, 100).unwrap(), 16);
        assert_eq!(buf[0], 100);
        assert_eq!(buf[15], 115);
    }

    #[test]
    fn test_short_fill_at_end() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.dat");
        std::fs::write(&path, [7u8; 20]).unwrap();

        let store = FileStore::open(&path).unwrap();
        let mut buf = [0u8; 16];
        assert_eq!(store.fill_at(&mut buf, 10).unwrap(), 10);
    }
}
