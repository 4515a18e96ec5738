//! On-disk cache of job analyses, keyed by job id.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::jobs::JobAnalysisEntry;

pub type JobAnalysisMap = BTreeMap<String, JobAnalysisEntry>;

/// Job analyses loaded from (and persisted to) one JSON file.
#[derive(Debug)]
pub struct JobAnalysisStore {
    path: PathBuf,
    entries: JobAnalysisMap,
}

/// Parse a store file. Missing file is empty; unparsable content is logged
/// and treated as empty.
fn read_map(path: &Path) -> Result<JobAnalysisMap, Error> {
    let contents = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(JobAnalysisMap::new()),
        Err(e) => return Err(Error::Io(e)),
    };
    match serde_json::from_str(&contents) {
        Ok(map) => Ok(map),
        Err(e) => {
            log::warn!("Error parsing existing store {}: {e}", path.display());
            Ok(JobAnalysisMap::new())
        }
    }
}

impl JobAnalysisStore {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let entries = read_map(&path)?;
        log::debug!("Loaded {} job analyses from {}", entries.len(), path.display());
        Ok(JobAnalysisStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, job_id: &str) -> bool {
        self.entries.contains_key(job_id)
    }

    pub fn get(&self, job_id: &str) -> Option<&JobAnalysisEntry> {
        self.entries.get(job_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JobAnalysisEntry)> {
        self.entries.iter()
    }

    /// Insert or overwrite entries by job id. Returns how many were merged.
    pub fn merge(&mut self, entries: impl IntoIterator<Item = (String, JobAnalysisEntry)>) -> usize {
        let mut n = 0;
        for (job_id, entry) in entries {
            self.entries.insert(job_id, entry);
            n += 1;
        }
        n
    }

    pub fn record(&mut self, job_id: &str, entry: JobAnalysisEntry) {
        self.entries.insert(job_id.to_string(), entry);
    }

    /// Write the store, layering in-memory entries over whatever the file
    /// holds now.
    pub fn persist(&self) -> Result<(), Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut on_disk = read_map(&self.path)?;
        for (job_id, entry) in &self.entries {
            on_disk.insert(job_id.clone(), entry.clone());
        }
        let json = serde_json::to_string_pretty(&on_disk).map_err(|source| Error::Store {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json)?;
        log::debug!("Persisted {} job analyses to {}", on_disk.len(), self.path.display());
        Ok(())
    }
}
