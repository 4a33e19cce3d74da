use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::annotations::{GoAnnotationIndex, GoTermMetadata, ProteinAccession};
use crate::parser;
use crate::{GoDomain, GoTermId, GoeaError, GoeaResult};

/// The background universe of an enrichment analysis
///
/// It contains all GO-annotated proteins of a reference species
/// ([`GoAnnotationIndex`]) and the names and domains of their
/// GO terms ([`GoTermMetadata`]).
///
/// A `Background` is immutable. Use [`BackgroundBuilder`] to create one.
///
/// # Examples
///
/// ```
/// use goea::{BackgroundBuilder, GoTermId};
///
/// let membrane = GoTermId::try_from("GO:0016020").unwrap();
///
/// let mut builder = BackgroundBuilder::new();
/// builder.species("Homo sapiens");
/// builder.add_term(membrane, "membrane");
/// builder.add_annotation("P04637", membrane);
/// builder.add_annotation("Q9Y6K9", membrane);
///
/// let background = builder.build().unwrap();
/// assert_eq!(background.species(), "Homo sapiens");
/// assert_eq!(background.index().frequency(&membrane), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Background {
    species: String,
    index: GoAnnotationIndex,
    metadata: GoTermMetadata,
}

impl Background {
    /// Loads a background from a GO mapping file
    ///
    /// See [`crate::parser::go_mapping`] for the file format
    ///
    /// # Errors
    ///
    /// - [`GoeaError::CannotOpenFile`]: the file does not exist or cannot be read
    /// - [`GoeaError::InvalidInput`]: the file is malformed or contains no mapped protein
    /// - [`GoeaError::ConfigurationRequired`]: `species` is empty
    pub fn from_mapping_file<P: AsRef<Path>>(species: &str, path: P) -> GoeaResult<Self> {
        let mut builder = BackgroundBuilder::new();
        builder.species(species);
        parser::go_mapping::parse_file(path, &mut builder)?;
        builder.build()
    }

    /// The reference species (or taxon) of the background
    pub fn species(&self) -> &str {
        &self.species
    }

    /// The protein to GO term annotations
    pub fn index(&self) -> &GoAnnotationIndex {
        &self.index
    }

    /// Names and domains of all GO terms
    pub fn metadata(&self) -> &GoTermMetadata {
        &self.metadata
    }

    /// The number of distinct proteins with at least one GO term
    pub fn mapped_protein_count(&self) -> u64 {
        self.index.mapped_protein_count()
    }
}

/// Builder for a [`Background`]
///
/// Annotations, term names and domains can be added in any order.
/// Terms that never receive a name are named after their accession.
#[derive(Debug, Default)]
pub struct BackgroundBuilder {
    species: Option<String>,
    index: GoAnnotationIndex,
    metadata: GoTermMetadata,
    /// Domains of terms that have no name yet
    pending_domains: HashMap<GoTermId, GoDomain>,
}

impl BackgroundBuilder {
    /// Constructs an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the reference species
    pub fn species(&mut self, species: &str) -> &mut Self {
        let species = species.trim();
        self.species = if species.is_empty() {
            None
        } else {
            Some(species.to_string())
        };
        self
    }

    /// Annotates `protein` with `term`
    ///
    /// Returns `false` if the annotation was already present
    pub fn add_annotation<P: Into<ProteinAccession>>(&mut self, protein: P, term: GoTermId) -> bool {
        self.index.insert(protein.into(), term)
    }

    /// Adds the name of a GO term
    ///
    /// Returns `false` if the term already has a name or the name
    /// is used by another term
    pub fn add_term(&mut self, term: GoTermId, name: &str) -> bool {
        if !self.metadata.insert(term, name) {
            return false;
        }
        if let Some(domain) = self.pending_domains.remove(&term) {
            self.metadata.set_domain(&term, domain);
        }
        true
    }

    /// Sets the domain of a GO term
    ///
    /// The domain of a term without name is kept until the name is added.
    pub fn set_domain(&mut self, term: GoTermId, domain: GoDomain) -> &mut Self {
        if !self.metadata.set_domain(&term, domain) {
            self.pending_domains.insert(term, domain);
        }
        self
    }

    /// Finishes the [`Background`]
    ///
    /// # Errors
    ///
    /// - [`GoeaError::ConfigurationRequired`]: no species was set
    /// - [`GoeaError::InvalidInput`]: no protein is annotated with any GO term
    pub fn build(mut self) -> GoeaResult<Background> {
        let species = self.species.ok_or(GoeaError::ConfigurationRequired)?;
        if self.index.is_empty() {
            return Err(GoeaError::InvalidInput(format!(
                "the background of {species} does not contain any GO-mapped protein"
            )));
        }

        let mut unnamed: Vec<GoTermId> = self
            .index
            .term_ids()
            .filter(|id| !self.metadata.contains(id))
            .copied()
            .collect();
        unnamed.extend(
            self.pending_domains
                .keys()
                .filter(|id| self.index.proteins(id).is_none())
                .copied(),
        );
        unnamed.sort_unstable();
        for id in unnamed {
            debug!("{} has no name, using its accession instead", id);
            self.metadata.insert(id, &id.to_string());
            if let Some(domain) = self.pending_domains.remove(&id) {
                self.metadata.set_domain(&id, domain);
            }
        }

        info!(
            "Background {}: {} GO terms, {} mapped proteins",
            species,
            self.index.len(),
            self.index.mapped_protein_count()
        );
        Ok(Background {
            species,
            index: self.index,
            metadata: self.metadata,
        })
    }
}
