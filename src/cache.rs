//! Persisted set of already-seen article URLs.
//!
//! The cache is a plain UTF-8 text file, one URL per line, oldest first.
//! Keeping insertion order in the file is what makes bounded retention
//! possible: when the cache exceeds its capacity, the oldest lines are the
//! ones evicted.
//!
//! # Durability
//!
//! Saves go through a sibling temp file followed by a rename, so an
//! interrupted run leaves either the old cache or the new one, never a
//! half-written file. Concurrent runs are not guarded against: two processes
//! racing on the same cache file means the last writer wins.

use std::collections::HashSet;
use std::error::Error;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Ordered, deduplicated set of URLs persisted across runs.
///
/// Membership testing is O(1); iteration order is insertion order, which is
/// also the on-disk line order.
#[derive(Debug)]
pub struct UrlCache {
    entries: Vec<String>,
    index: HashSet<String>,
    capacity: usize,
}

impl UrlCache {
    /// Create an empty cache with the given retention capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: HashSet::new(),
            capacity,
        }
    }

    /// Load the cache from `path`.
    ///
    /// A missing file is an empty cache — the normal state on first run. Any
    /// other read failure (permissions, non-UTF-8 content) propagates.
    /// Blank lines are skipped; duplicate lines collapse to their first
    /// occurrence.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>, capacity: usize) -> Result<Self, Box<dyn Error>> {
        let mut cache = Self::new(capacity);

        let content = match fs::read_to_string(path.as_ref()).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No cache file yet, starting empty");
                return Ok(cache);
            }
            Err(e) => return Err(e.into()),
        };

        for line in content.lines() {
            let line = line.trim();
            if !line.is_empty() {
                cache.insert(line.to_string());
            }
        }

        info!(count = cache.len(), "Loaded URL cache");
        Ok(cache)
    }

    /// Record a URL as seen. Returns `true` if it was not already present.
    ///
    /// When the cache grows past its capacity, the oldest entry is evicted.
    pub fn insert(&mut self, url: String) -> bool {
        if !self.index.insert(url.clone()) {
            return false;
        }
        self.entries.push(url);

        if self.entries.len() > self.capacity {
            let evicted = self.entries.remove(0);
            self.index.remove(&evicted);
            debug!(url = %evicted, "Evicted oldest cache entry");
        }
        true
    }

    /// Whether `url` has been seen before.
    pub fn contains(&self, url: &str) -> bool {
        self.index.contains(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the cached URLs, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Persist the cache to `path`, overwriting any prior content.
    ///
    /// The write is atomic: the content lands in a sibling `.tmp` file which
    /// is then renamed over the target.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
        let path = path.as_ref();
        let tmp_path = sibling_tmp_path(path);

        fs::write(&tmp_path, self.entries.join("\n")).await?;
        fs::rename(&tmp_path, path).await?;

        info!(count = self.len(), "Saved URL cache");
        Ok(())
    }
}

fn sibling_tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let cache = UrlCache::load(dir.path().join("absent.txt"), 1000)
            .await
            .unwrap();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("last_articles.txt");

        let mut cache = UrlCache::new(1000);
        cache.insert("https://www.nikkei.com/article/A/".to_string());
        cache.insert("https://www.nikkei.com/article/B/".to_string());
        cache.insert("https://www.nikkei.com/article/C/".to_string());
        cache.save(&path).await.unwrap();

        let reloaded = UrlCache::load(&path, 1000).await.unwrap();
        assert_eq!(
            reloaded.iter().collect::<Vec<_>>(),
            vec![
                "https://www.nikkei.com/article/A/",
                "https://www.nikkei.com/article/B/",
                "https://www.nikkei.com/article/C/",
            ]
        );
    }

    #[tokio::test]
    async fn test_save_overwrites_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("last_articles.txt");

        let mut first = UrlCache::new(1000);
        first.insert("https://www.nikkei.com/article/OLD/".to_string());
        first.save(&path).await.unwrap();

        let mut second = UrlCache::new(1000);
        second.insert("https://www.nikkei.com/article/NEW/".to_string());
        second.save(&path).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "https://www.nikkei.com/article/NEW/");

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["last_articles.txt"]);
    }

    #[test]
    fn test_insert_deduplicates() {
        let mut cache = UrlCache::new(1000);
        assert!(cache.insert("https://example.com/a".to_string()));
        assert!(!cache.insert("https://example.com/a".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_union_semantics() {
        // cache = {A, B}, extracted = {B, C} -> new = {C}, final = {A, B, C}
        let mut cache = UrlCache::new(1000);
        cache.insert("A".to_string());
        cache.insert("B".to_string());

        let extracted = ["B", "C"];
        let new: Vec<_> = extracted
            .iter()
            .filter(|url| !cache.contains(url))
            .collect();
        assert_eq!(new, vec![&"C"]);

        for url in extracted {
            cache.insert(url.to_string());
        }
        assert_eq!(cache.iter().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut cache = UrlCache::new(3);
        for url in ["a", "b", "c", "d"] {
            cache.insert(url.to_string());
        }

        assert_eq!(cache.len(), 3);
        assert!(!cache.contains("a"));
        assert_eq!(cache.iter().collect::<Vec<_>>(), vec!["b", "c", "d"]);

        // An evicted URL can come back as a fresh entry.
        assert!(cache.insert("a".to_string()));
    }

    #[tokio::test]
    async fn test_load_skips_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("last_articles.txt");
        std::fs::write(&path, "https://example.com/a\n\n  \nhttps://example.com/b").unwrap();

        let cache = UrlCache::load(&path, 1000).await.unwrap();
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("https://example.com/a"));
        assert!(cache.contains("https://example.com/b"));
    }
}
