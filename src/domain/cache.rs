use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::{GoDomain, GoTermId, GoeaError, GoeaResult};

/// Local mapping of GO accessions to their domain
///
/// The cache is optionally backed by a tab separated file:
///
/// ```text
/// GO:0005515	molecular_function
/// GO:0016020	cellular_component
/// ```
///
/// New entries are appended to the file as soon as they are inserted.
/// All writes are serialized through an internal lock, so a single cache
/// can be shared by concurrently running analyses.
#[derive(Debug, Default)]
pub struct DomainCache {
    entries: Mutex<HashMap<GoTermId, GoDomain>>,
    path: Option<PathBuf>,
}

impl DomainCache {
    /// Constructs a cache that is not persisted
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the cache file at `path`
    ///
    /// A missing file is not an error, it is created with the first insert.
    ///
    /// # Errors
    ///
    /// - [`GoeaError::CannotOpenFile`]: the file exists but cannot be read
    /// - [`GoeaError::InvalidInput`]: the file contains a malformed line
    pub fn open<P: AsRef<Path>>(path: P) -> GoeaResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut entries = HashMap::new();
        if path.exists() {
            let filename = path.display().to_string();
            let content = fs::read_to_string(&path)
                .map_err(|_| GoeaError::CannotOpenFile(filename.clone()))?;
            for line in content.lines() {
                if let Some((term, domain)) = parse_line(line)? {
                    entries.insert(term, domain);
                }
            }
            info!("Loaded {} GO domains from {}", entries.len(), filename);
        }
        Ok(Self {
            entries: Mutex::new(entries),
            path: Some(path),
        })
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<GoTermId, GoDomain>> {
        // the map itself stays consistent even if a writer panicked
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The cached domain of `term`
    pub fn get(&self, term: &GoTermId) -> Option<GoDomain> {
        self.entries().get(term).copied()
    }

    /// Adds the domain of `term`, if it is not yet cached
    ///
    /// Returns `false` if the term was already cached. Cached domains
    /// are never overwritten.
    ///
    /// # Errors
    ///
    /// [`GoeaError::CannotOpenFile`] if the cache file cannot be written.
    /// The domain is still cached in memory in this case.
    pub fn insert(&self, term: GoTermId, domain: GoDomain) -> GoeaResult<bool> {
        let mut entries = self.entries();
        match entries.entry(term) {
            Entry::Occupied(_) => return Ok(false),
            Entry::Vacant(entry) => {
                entry.insert(domain);
            }
        }
        if let Some(path) = &self.path {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|_| GoeaError::CannotOpenFile(path.display().to_string()))?;
            writeln!(file, "{}\t{}", term, domain.namespace())
                .map_err(|_| GoeaError::CannotOpenFile(path.display().to_string()))?;
        }
        Ok(true)
    }

    /// Rewrites the cache file with all cached domains, sorted by accession
    ///
    /// Does nothing for in-memory caches.
    ///
    /// # Errors
    ///
    /// [`GoeaError::CannotOpenFile`] if the cache file cannot be written
    pub fn save(&self) -> GoeaResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let entries = self.entries();
        let mut sorted: Vec<(&GoTermId, &GoDomain)> = entries.iter().collect();
        sorted.sort_unstable_by_key(|(term, _)| **term);

        let mut content = String::with_capacity(sorted.len() * 32);
        for (term, domain) in sorted {
            // writing into a String cannot fail
            let _ = writeln!(content, "{}\t{}", term, domain.namespace());
        }
        fs::write(path, content).map_err(|_| GoeaError::CannotOpenFile(path.display().to_string()))?;
        debug!("Saved {} GO domains to {}", entries.len(), path.display());
        Ok(())
    }

    /// The file backing the cache, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The number of cached domains
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns `true` if no domain is cached
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Parses one line of the cache file, skipping blank lines and comments
fn parse_line(line: &str) -> GoeaResult<Option<(GoTermId, GoDomain)>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let Some((term, domain)) = line.split_once('\t') else {
        return Err(GoeaError::InvalidInput(line.to_string()));
    };
    Ok(Some((GoTermId::try_from(term)?, domain.parse()?)))
}
