use crate::utils::{Result, ScoutError};
use indexmap::IndexMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name → translated name, persisted as a pretty-printed JSON object.
///
/// Keys keep insertion order so the file grows by appending and diffs stay
/// readable between runs.
#[derive(Debug, Clone)]
pub struct TranslationCache {
    path: PathBuf,
    terms: IndexMap<String, String>,
}

impl TranslationCache {
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            terms: IndexMap::new(),
        }
    }

    /// A missing file is an empty cache. A file that exists but does not hold
    /// a JSON object of strings is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            tracing::info!(path = %path.display(), "No translation cache yet, starting empty");
            return Ok(Self::empty(path));
        }

        let content = std::fs::read_to_string(&path)?;
        let terms: IndexMap<String, String> =
            serde_json::from_str(&content).map_err(|e| ScoutError::CacheCorrupt {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!(path = %path.display(), entries = terms.len(), "Translation cache loaded");
        Ok(Self { path, terms })
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.terms.get(source).map(String::as_str)
    }

    pub fn contains(&self, source: &str) -> bool {
        self.terms.contains_key(source)
    }

    /// Inserts entries whose key is not cached yet. Returns how many were new.
    pub fn merge<I>(&mut self, new_terms: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut inserted = 0;
        for (source, target) in new_terms {
            if let indexmap::map::Entry::Vacant(slot) = self.terms.entry(source) {
                slot.insert(target);
                inserted += 1;
            }
        }
        inserted
    }

    /// Names from `names` that have no entry, in their original order.
    pub fn pending<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        names
            .into_iter()
            .filter(|name| !self.contains(name))
            .cloned()
            .collect()
    }

    /// Replaces the file on disk with the full mapping via write-then-rename.
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(&self.terms)?;
        let tmp_path = self.tmp_path();

        {
            let mut file = std::fs::File::create(&tmp_path)?;
            file.write_all(data.as_bytes())?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), entries = self.terms.len(), "Translation cache saved");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "translation_cache.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
