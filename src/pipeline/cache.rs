//! Content-addressed cache of parsed trial tables.

use log::debug;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::PipelineError;
use crate::table::{delimiter_for, RawTrialTable, TableError};

/// SHA-256 digest of a trial file's bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Digest `bytes`
    pub fn of(bytes: &[u8]) -> Self {
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&Sha256::digest(bytes));
        Self(digest)
    }

    /// Lowercase hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// One uploaded trial file: its display name and raw contents
#[derive(Debug, Clone)]
pub struct TrialInput {
    name: String,
    bytes: Vec<u8>,
}

impl TrialInput {
    /// Wrap bytes already in memory; `name` selects the delimiter
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a trial file from disk; a read failure names the path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| PipelineError::Io {
            file: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }

    /// Display name, usually the file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw file contents
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Digest of the contents
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.bytes)
    }
}

/// Parsed tables keyed by content digest and delimiter.
///
/// Identical uploads are parsed once. Parsing is pure, so a hit always yields
/// the same table a fresh parse would.
#[derive(Debug, Default)]
pub struct TrialCache {
    tables: HashMap<(Fingerprint, u8), Arc<RawTrialTable>>,
    hits: usize,
    misses: usize,
}

impl TrialCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the parsed table for `trial`, parsing it on first sight
    pub fn get_or_parse(&mut self, trial: &TrialInput) -> Result<Arc<RawTrialTable>, TableError> {
        let fingerprint = trial.fingerprint();
        let key = (fingerprint, delimiter_for(Path::new(trial.name())));

        if let Some(table) = self.tables.get(&key) {
            self.hits += 1;
            debug!("Cache hit for {} ({})", trial.name(), fingerprint);
            return Ok(Arc::clone(table));
        }

        self.misses += 1;
        debug!("Cache miss for {} ({}), parsing", trial.name(), fingerprint);
        let table = Arc::new(RawTrialTable::from_bytes(trial.bytes(), trial.name())?);
        self.tables.insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Number of cached tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Lookups served from the cache
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Lookups that required a parse
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Drop every cached table and reset the counters
    pub fn clear(&mut self) {
        self.tables.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
