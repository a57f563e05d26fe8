//! JSON document store.
//!
//! One file per logical document, named after a sanitized key. `add` refuses
//! to overwrite and `write` refuses to create, so callers always know which
//! of the two they meant.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StoreError, StoreResult};

const EXTENSION: &str = "json";

/// Character that replaces spaces in document names.
pub const NAME_FILLER: char = '_';

/// A directory of JSON documents.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// The store's directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of an existing document, if any.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        let path = self.path_for(name).ok()?;
        path.is_file().then_some(path)
    }

    /// Read and decode a document. Missing or empty documents read as `None`.
    pub fn read<T: DeserializeOwned>(&self, name: &str) -> StoreResult<Option<T>> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Malformed {
                name: name.to_string(),
                source,
            })
    }

    /// Overwrite an existing document.
    pub fn write<T: Serialize>(&self, name: &str, record: &T) -> StoreResult<()> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        let bytes = encode(name, record)?;

        let staging = path.with_extension("json.tmp");
        fs::write(&staging, &bytes).map_err(|source| StoreError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &path).map_err(|source| StoreError::Io { path, source })
    }

    /// Create a new document. Fails if one already exists under that name.
    pub fn add<T: Serialize>(&self, name: &str, record: &T) -> StoreResult<()> {
        let path = self.path_for(name)?;
        let bytes = encode(name, record)?;

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| {
                if source.kind() == std::io::ErrorKind::AlreadyExists {
                    StoreError::Duplicate(name.to_string())
                } else {
                    StoreError::Io {
                        path: path.clone(),
                        source,
                    }
                }
            })?;
        file.write_all(&bytes)
            .map_err(|source| StoreError::Io { path, source })
    }

    /// Delete a document.
    pub fn delete(&self, name: &str) -> StoreResult<()> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        fs::remove_file(&path).map_err(|source| StoreError::Io { path, source })
    }

    /// Names of every document in the store, sorted.
    pub fn names(&self) -> StoreResult<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        Ok(names)
    }

    fn path_for(&self, name: &str) -> StoreResult<PathBuf> {
        let key = sanitize_name(name)?;
        Ok(self.root.join(format!("{key}.{EXTENSION}")))
    }
}

fn encode<T: Serialize>(name: &str, record: &T) -> StoreResult<Vec<u8>> {
    serde_json::to_vec_pretty(record).map_err(|source| StoreError::Malformed {
        name: name.to_string(),
        source,
    })
}

/// Turn a player-chosen name into a document key.
///
/// Lowercases, maps spaces to [`NAME_FILLER`] and drops anything that is not
/// a letter, digit, `-` or `_`.
pub fn sanitize_name(name: &str) -> StoreResult<String> {
    let key: String = name
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some(NAME_FILLER),
            'a'..='z' | '0'..='9' | '-' | '_' => Some(c),
            _ => None,
        })
        .collect();

    if key.is_empty() {
        Err(StoreError::InvalidName(name.to_string()))
    } else {
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
        count: u32,
    }

    fn note(text: &str, count: u32) -> Note {
        Note {
            text: text.to_string(),
            count,
        }
    }

    fn store() -> (TempDir, DocumentStore) {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::open(dir.path().join("docs")).unwrap();
        (dir, store)
    }

    #[test]
    fn add_then_read() {
        let (_dir, store) = store();
        store.add("first note", &note("hello", 1)).unwrap();

        assert!(store.locate("first note").is_some());
        assert_eq!(store.read::<Note>("first note").unwrap(), Some(note("hello", 1)));
        assert_eq!(store.names().unwrap(), vec!["first_note"]);
    }

    #[test]
    fn add_refuses_duplicates() {
        let (_dir, store) = store();
        store.add("bob", &note("a", 1)).unwrap();
        let err = store.add("Bob", &note("b", 2)).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.read::<Note>("bob").unwrap(), Some(note("a", 1)));
    }

    #[test]
    fn write_requires_existing_document() {
        let (_dir, store) = store();
        let err = store.write("ghost", &note("boo", 0)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        store.add("ghost", &note("boo", 0)).unwrap();
        store.write("ghost", &note("boo", 7)).unwrap();
        assert_eq!(store.read::<Note>("ghost").unwrap(), Some(note("boo", 7)));
    }

    #[test]
    fn missing_and_empty_documents_read_as_none() {
        let (_dir, store) = store();
        assert_eq!(store.read::<Note>("nobody").unwrap(), None);

        fs::write(store.root().join("blank.json"), "  \n").unwrap();
        assert_eq!(store.read::<Note>("blank").unwrap(), None);
    }

    #[test]
    fn malformed_documents_are_errors() {
        let (_dir, store) = store();
        fs::write(store.root().join("broken.json"), "{ nope").unwrap();
        let err = store.read::<Note>("broken").unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn delete_removes_document() {
        let (_dir, store) = store();
        store.add("temp", &note("x", 0)).unwrap();
        store.delete("temp").unwrap();
        assert!(store.locate("temp").is_none());
        assert!(matches!(store.delete("temp"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn names_are_sanitized() {
        assert_eq!(sanitize_name("  Sir Lancelot ").unwrap(), "sir_lancelot");
        assert_eq!(sanitize_name("../etc/passwd").unwrap(), "etcpasswd");
        assert!(matches!(sanitize_name("!!"), Err(StoreError::InvalidName(_))));
    }
}
