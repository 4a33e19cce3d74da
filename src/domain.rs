//! Resolving the ontology domain of GO terms
//!
//! Background files do not always contain the domain of a GO term. Missing
//! domains are fetched from a remote ontology service and cached in a local
//! file, so each term is looked up at most once.
//!
//! - [`DomainCache`]: the local, persistent accession to domain mapping
//! - [`DomainLookup`]: any source of domains, e.g. [`OboXmlLookup`]
//! - [`TimeoutLookup`]: limits the time a single lookup may take
//! - [`DomainResolver`]: the cache in front of an optional remote lookup
//!
//! # Examples
//!
//! ```
//! use goea::{DomainCache, DomainResolver, GoDomain, GoTermId, GoeaResult};
//! use goea::domain::DomainLookup;
//!
//! struct Fixed;
//!
//! impl DomainLookup for Fixed {
//!     fn lookup(&self, _term: GoTermId) -> GoeaResult<Option<GoDomain>> {
//!         Ok(Some(GoDomain::MolecularFunction))
//!     }
//! }
//!
//! let resolver = DomainResolver::new(DomainCache::in_memory()).with_lookup(Fixed);
//! let term = GoTermId::from(5515u32);
//!
//! assert_eq!(resolver.resolve(term), Some(GoDomain::MolecularFunction));
//! assert_eq!(resolver.cache().get(&term), Some(GoDomain::MolecularFunction));
//! ```

use tracing::{debug, warn};

use crate::{GoDomain, GoTermId};

mod cache;
mod lookup;

pub use cache::DomainCache;
pub use lookup::{parse_obo_xml_namespace, DomainLookup, OboXmlLookup, TimeoutLookup};

/// Read-through cache of GO domains
///
/// Domains are first looked up in the [`DomainCache`]. On a cache miss,
/// the remote [`DomainLookup`] (if any) is queried and a successful answer
/// is added to the cache.
///
/// The resolver can be shared between threads. Concurrent analyses that
/// resolve the same term may both query the remote service, but only
/// the first answer is written to the cache.
pub struct DomainResolver {
    cache: DomainCache,
    remote: Option<Box<dyn DomainLookup>>,
}

impl DomainResolver {
    /// Constructs a resolver that only uses the cache
    pub fn new(cache: DomainCache) -> Self {
        Self {
            cache,
            remote: None,
        }
    }

    /// Adds a remote lookup for cache misses
    #[must_use]
    pub fn with_lookup<L: DomainLookup + 'static>(mut self, lookup: L) -> Self {
        self.remote = Some(Box::new(lookup));
        self
    }

    /// The domain of `term`
    ///
    /// Returns `None` if the domain is neither cached nor available from
    /// the remote lookup. Failing lookups are logged and never abort the
    /// analysis.
    pub fn resolve(&self, term: GoTermId) -> Option<GoDomain> {
        if let Some(domain) = self.cache.get(&term) {
            return Some(domain);
        }
        let remote = self.remote.as_ref()?;
        match remote.lookup(term) {
            Ok(Some(domain)) => {
                debug!("Resolved {} to {}", term, domain.namespace());
                if let Err(err) = self.cache.insert(term, domain) {
                    warn!("Unable to persist domain of {}: {}", term, err);
                }
                Some(domain)
            }
            Ok(None) => {
                debug!("No domain available for {}", term);
                None
            }
            Err(err) => {
                warn!("Unable to resolve domain of {}: {}", term, err);
                None
            }
        }
    }

    /// The underlying cache
    pub fn cache(&self) -> &DomainCache {
        &self.cache
    }
}

impl std::fmt::Debug for DomainResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainResolver")
            .field("cache", &self.cache)
            .field("remote", &self.remote.is_some())
            .finish()
    }
}
