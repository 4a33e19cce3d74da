use std::borrow::Borrow;
use std::fmt::Display;

/// A unique identifier for a protein, e.g. a UniProt accession
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProteinAccession {
    inner: String,
}

impl ProteinAccession {
    /// Returns the accession as `&str`
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl From<&str> for ProteinAccession {
    fn from(s: &str) -> Self {
        Self {
            inner: s.trim().to_string(),
        }
    }
}

impl From<String> for ProteinAccession {
    fn from(s: String) -> Self {
        if s.trim().len() == s.len() {
            Self { inner: s }
        } else {
            Self::from(s.as_str())
        }
    }
}

impl Borrow<str> for ProteinAccession {
    fn borrow(&self) -> &str {
        &self.inner
    }
}

impl Display for ProteinAccession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// A protein identified in the analyzed dataset
///
/// Only validated, non-decoy and non-hidden matches take part
/// in the enrichment analysis, see [`ProteinMatch::is_eligible`].
///
/// # Examples
///
/// ```
/// use goea::annotations::ProteinMatch;
///
/// let protein = ProteinMatch::new("P12345").validated(true);
/// assert!(protein.is_eligible());
///
/// let decoy = ProteinMatch::new("REV_P12345").validated(true).decoy(true);
/// assert!(!decoy.is_eligible());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProteinMatch {
    accession: ProteinAccession,
    validated: bool,
    decoy: bool,
    hidden: bool,
}

impl ProteinMatch {
    /// Constructs a new, not yet validated, target match
    pub fn new<A: Into<ProteinAccession>>(accession: A) -> Self {
        Self {
            accession: accession.into(),
            validated: false,
            decoy: false,
            hidden: false,
        }
    }

    /// Sets the validation status of the match
    #[must_use]
    pub fn validated(mut self, validated: bool) -> Self {
        self.validated = validated;
        self
    }

    /// Marks the match as decoy hit
    #[must_use]
    pub fn decoy(mut self, decoy: bool) -> Self {
        self.decoy = decoy;
        self
    }

    /// Marks the match as hidden by the user
    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// The accession of the main protein of the match
    pub fn accession(&self) -> &ProteinAccession {
        &self.accession
    }

    /// Returns `true` if the match is validated, not a decoy and not hidden
    pub fn is_eligible(&self) -> bool {
        self.validated && !self.decoy && !self.hidden
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn eligibility() {
        assert!(!ProteinMatch::new("P1").is_eligible());
        assert!(ProteinMatch::new("P1").validated(true).is_eligible());
        assert!(!ProteinMatch::new("P1")
            .validated(true)
            .hidden(true)
            .is_eligible());
        assert!(!ProteinMatch::new("P1")
            .validated(true)
            .decoy(true)
            .is_eligible());
    }

    #[test]
    fn accession_is_trimmed() {
        let protein = ProteinMatch::new(String::from(" Q9Y6K9\t"));
        assert_eq!(protein.accession().as_str(), "Q9Y6K9");
        assert_eq!(ProteinAccession::from("P04637").to_string(), "P04637");
    }
}
