use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::{GoDomain, GoTermId};

/// Name and (if known) ontology domain of a GO term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermInfo {
    name: String,
    domain: Option<GoDomain>,
}

impl TermInfo {
    /// The human readable name of the term
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ontology domain of the term, `None` if not yet resolved
    pub fn domain(&self) -> Option<GoDomain> {
        self.domain
    }
}

/// Names and domains of all GO terms of a background
///
/// Term names are unique. Iterating the metadata yields the terms
/// alphabetically by name, which is the display order of the analysis.
#[derive(Debug, Default, Clone)]
pub struct GoTermMetadata {
    terms: HashMap<GoTermId, TermInfo>,
    names: BTreeMap<String, GoTermId>,
}

impl GoTermMetadata {
    /// Adds a term with its name
    ///
    /// Returns `false` if the term was already present or if another term
    /// uses the same name. In both cases the existing data is kept.
    pub(crate) fn insert(&mut self, id: GoTermId, name: &str) -> bool {
        if self.terms.contains_key(&id) {
            return false;
        }
        let name = name.trim();
        match self.names.entry(name.to_string()) {
            Entry::Occupied(existing) => {
                warn!(
                    "Term name '{}' of {} is already used by {}",
                    name,
                    id,
                    existing.get()
                );
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(id);
                self.terms.insert(
                    id,
                    TermInfo {
                        name: name.to_string(),
                        domain: None,
                    },
                );
                true
            }
        }
    }

    /// Sets the domain of an existing term
    ///
    /// Returns `false` if the term does not exist
    pub(crate) fn set_domain(&mut self, id: &GoTermId, domain: GoDomain) -> bool {
        match self.terms.get_mut(id) {
            Some(info) => {
                info.domain = Some(domain);
                true
            }
            None => false,
        }
    }

    /// Name and domain of the term
    pub fn get(&self, id: &GoTermId) -> Option<&TermInfo> {
        self.terms.get(id)
    }

    /// The name of the term
    pub fn name(&self, id: &GoTermId) -> Option<&str> {
        self.terms.get(id).map(TermInfo::name)
    }

    /// The domain of the term, if it is already known
    pub fn domain(&self, id: &GoTermId) -> Option<GoDomain> {
        self.terms.get(id).and_then(TermInfo::domain)
    }

    /// Returns the [`GoTermId`] of the term with the given name
    pub fn id_by_name(&self, name: &str) -> Option<GoTermId> {
        self.names.get(name).copied()
    }

    /// Returns `true` if the term is known
    pub fn contains(&self, id: &GoTermId) -> bool {
        self.terms.contains_key(id)
    }

    /// Iterates `(name, id)` of all terms, alphabetically by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, GoTermId)> {
        self.names.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// The number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if there are no terms
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn alphabetical_iteration() {
        let mut meta = GoTermMetadata::default();
        meta.insert(3u32.into(), "zinc ion binding");
        meta.insert(1u32.into(), "apoptotic process");
        meta.insert(2u32.into(), "membrane");

        let names: Vec<&str> = meta.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["apoptotic process", "membrane", "zinc ion binding"]);
    }

    #[test]
    fn duplicate_name_keeps_first() {
        let mut meta = GoTermMetadata::default();
        assert!(meta.insert(1u32.into(), "membrane"));
        assert!(!meta.insert(2u32.into(), "membrane"));
        assert_eq!(meta.id_by_name("membrane"), Some(1u32.into()));
        assert!(!meta.contains(&2u32.into()));
    }

    #[test]
    fn duplicate_id_keeps_first() {
        let mut meta = GoTermMetadata::default();
        assert!(meta.insert(1u32.into(), "membrane"));
        assert!(!meta.insert(1u32.into(), "plasma membrane"));
        assert_eq!(meta.name(&1u32.into()), Some("membrane"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn domains() {
        let mut meta = GoTermMetadata::default();
        meta.insert(1u32.into(), "membrane");
        assert!(meta.domain(&1u32.into()).is_none());
        assert!(meta.set_domain(&1u32.into(), GoDomain::CellularComponent));
        assert_eq!(meta.domain(&1u32.into()), Some(GoDomain::CellularComponent));
        assert!(!meta.set_domain(&5u32.into(), GoDomain::CellularComponent));
    }
}
