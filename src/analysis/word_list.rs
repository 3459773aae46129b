//! Word list resources.
//!
//! Stop tags, stop words and keywords can be given inline or as a resource
//! name (`*_path` options). A [`WordListLoader`] turns such a name into a list
//! of entries: one entry per line, surrounding whitespace trimmed, blank lines
//! and `#` comment lines skipped.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{KotodamaError, Result};

/// Resolves a named word list into its entries.
pub trait WordListLoader: Send + Sync {
    /// Load the list registered under `name`.
    fn load(&self, name: &str) -> Result<Vec<String>>;

    /// Filesystem location of the resource `name`, for resources read by
    /// other libraries (user dictionaries).
    fn locate(&self, name: &str) -> PathBuf {
        PathBuf::from(name)
    }
}

/// Split word list text into entries.
pub fn parse_word_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect()
}

/// Loads word lists from UTF-8 files under a base directory.
///
/// Absolute names are read as-is; relative names are resolved against the
/// base directory.
#[derive(Debug, Clone)]
pub struct FileWordListLoader {
    base_dir: PathBuf,
}

impl FileWordListLoader {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        FileWordListLoader {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl Default for FileWordListLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl WordListLoader for FileWordListLoader {
    fn load(&self, name: &str) -> Result<Vec<String>> {
        let path = self.resolve(name);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                KotodamaError::not_found(format!("word list '{}'", path.display()))
            }
            _ => KotodamaError::Io(e),
        })?;
        let words = parse_word_list(&content);
        log::debug!("loaded {} entries from {}", words.len(), path.display());
        Ok(words)
    }

    fn locate(&self, name: &str) -> PathBuf {
        self.resolve(name)
    }
}

/// Serves word lists registered in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryWordListLoader {
    lists: HashMap<String, Vec<String>>,
}

impl MemoryWordListLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a list under `name`, replacing any previous one.
    pub fn insert<N, I, S>(&mut self, name: N, words: I)
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists
            .insert(name.into(), words.into_iter().map(|s| s.into()).collect());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_list<N, I, S>(mut self, name: N, words: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, words);
        self
    }
}

impl WordListLoader for MemoryWordListLoader {
    fn load(&self, name: &str) -> Result<Vec<String>> {
        self.lists
            .get(name)
            .cloned()
            .ok_or_else(|| KotodamaError::not_found(format!("word list '{name}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_word_list() {
        let words = parse_word_list("# comment\n  これ \n\nそれ\r\n#あれ\n");
        assert_eq!(words, vec!["これ", "それ"]);
    }

    #[test]
    fn test_file_loader() {
        let dir = TempDir::new().unwrap();
        let mut file = fs::File::create(dir.path().join("stoptags.txt")).unwrap();
        writeln!(file, "# tags").unwrap();
        writeln!(file, "助詞-係助詞").unwrap();
        writeln!(file).unwrap();
        writeln!(file, " 動詞-自立 ").unwrap();

        let loader = FileWordListLoader::new(dir.path());
        let words = loader.load("stoptags.txt").unwrap();
        assert_eq!(words, vec!["助詞-係助詞", "動詞-自立"]);

        let absolute = dir.path().join("stoptags.txt");
        let words = FileWordListLoader::default()
            .load(absolute.to_str().unwrap())
            .unwrap();
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_file_loader_missing_file() {
        let dir = TempDir::new().unwrap();
        let loader = FileWordListLoader::new(dir.path());
        let err = loader.load("missing.txt").unwrap_err();
        assert!(matches!(err, KotodamaError::NotFound(_)));
    }

    #[test]
    fn test_empty_file_is_empty_list() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("empty.txt"), "").unwrap();
        let loader = FileWordListLoader::new(dir.path());
        assert!(loader.load("empty.txt").unwrap().is_empty());
    }

    #[test]
    fn test_locate() {
        let loader = FileWordListLoader::new("/etc/kotodama");
        assert_eq!(loader.locate("user.csv"), PathBuf::from("/etc/kotodama/user.csv"));
        assert_eq!(loader.locate("/tmp/user.csv"), PathBuf::from("/tmp/user.csv"));
        assert_eq!(MemoryWordListLoader::new().locate("user.csv"), PathBuf::from("user.csv"));
    }

    #[test]
    fn test_memory_loader() {
        let loader = MemoryWordListLoader::new().with_list("keywords", vec!["パーティー"]);
        assert_eq!(loader.load("keywords").unwrap(), vec!["パーティー"]);
        assert!(loader.load("other").is_err());
    }
}
