use std::fmt::Display;
use std::str::FromStr;

use crate::{GoeaError, GoeaResult};

/// The three branches (namespaces) of the Gene Ontology
///
/// Every GO term belongs to exactly one domain. When the domain of a term
/// is not (yet) known, it is represented as `None` instead.
///
/// # Examples
///
/// ```
/// use goea::GoDomain;
///
/// let domain: GoDomain = "biological_process".parse().unwrap();
/// assert_eq!(domain, GoDomain::BiologicalProcess);
/// assert_eq!(domain.to_string(), "Biological Process");
/// assert_eq!(domain.namespace(), "biological_process");
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum GoDomain {
    /// `biological_process`
    BiologicalProcess,
    /// `molecular_function`
    MolecularFunction,
    /// `cellular_component`
    CellularComponent,
}

impl GoDomain {
    /// The OBO namespace identifier of the domain
    pub fn namespace(&self) -> &'static str {
        match self {
            GoDomain::BiologicalProcess => "biological_process",
            GoDomain::MolecularFunction => "molecular_function",
            GoDomain::CellularComponent => "cellular_component",
        }
    }
}

impl FromStr for GoDomain {
    type Err = GoeaError;

    /// Accepts OBO namespaces, human readable labels and GAF aspect codes
    fn from_str(s: &str) -> GoeaResult<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "biological_process" | "p" => Ok(GoDomain::BiologicalProcess),
            "molecular_function" | "f" => Ok(GoDomain::MolecularFunction),
            "cellular_component" | "c" => Ok(GoDomain::CellularComponent),
            _ => Err(GoeaError::InvalidInput(format!("unknown GO domain: {s}"))),
        }
    }
}

impl Display for GoDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GoDomain::BiologicalProcess => "Biological Process",
            GoDomain::MolecularFunction => "Molecular Function",
            GoDomain::CellularComponent => "Cellular Component",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_namespaces() {
        assert_eq!(
            "molecular_function".parse::<GoDomain>().unwrap(),
            GoDomain::MolecularFunction
        );
        assert_eq!(
            "cellular_component".parse::<GoDomain>().unwrap(),
            GoDomain::CellularComponent
        );
    }

    #[test]
    fn parse_labels_and_aspects() {
        assert_eq!(
            "Cellular Component".parse::<GoDomain>().unwrap(),
            GoDomain::CellularComponent
        );
        assert_eq!("P".parse::<GoDomain>().unwrap(), GoDomain::BiologicalProcess);
        assert_eq!("f".parse::<GoDomain>().unwrap(), GoDomain::MolecularFunction);
    }

    #[test]
    fn unknown_domain() {
        assert!("external".parse::<GoDomain>().is_err());
        assert!("".parse::<GoDomain>().is_err());
    }

    #[test]
    fn namespace_roundtrip() {
        for domain in [
            GoDomain::BiologicalProcess,
            GoDomain::MolecularFunction,
            GoDomain::CellularComponent,
        ] {
            assert_eq!(domain.namespace().parse::<GoDomain>().unwrap(), domain);
        }
    }
}
