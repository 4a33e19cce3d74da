//! GO terms, their ontology domain and groups of terms
//!
//! A GO term is identified by its [`GoTermId`] (e.g. `GO:0005515`). Each term
//! belongs to one of the three branches of the Gene Ontology, its [`GoDomain`].
//! The GO terms annotated to a single protein are collected in a [`GoGroup`].

mod domain;
mod goterm_id;
mod group;

pub use domain::GoDomain;
pub use goterm_id::GoTermId;
pub use group::{GoGroup, GoTermIds};
