use core::fmt::Debug;
use std::fmt::Display;
use std::str::FromStr;

use crate::{GoeaError, GoeaResult};

/// A unique identifier for a GO term
///
/// The identifier is stored as its numerical part only, the `GO:` prefix
/// is added back when displaying it.
///
/// # Examples
///
/// ```
/// use goea::GoTermId;
///
/// let id = GoTermId::try_from("GO:0005515").unwrap();
/// assert_eq!(id.as_u32(), 5515);
/// assert_eq!(id.to_string(), "GO:0005515");
///
/// assert!(GoTermId::try_from("HP:0005515").is_err());
/// ```
#[derive(Copy, Clone, Eq, Hash, Ord, PartialEq, PartialOrd, Default)]
pub struct GoTermId {
    inner: u32,
}

impl GoTermId {
    /// Returns the integer representation of the term id
    pub fn as_u32(&self) -> u32 {
        self.inner
    }
}

impl TryFrom<&str> for GoTermId {
    type Error = GoeaError;
    fn try_from(s: &str) -> GoeaResult<Self> {
        let s = s.trim();
        let Some(number) = s.strip_prefix("GO:") else {
            return Err(GoeaError::InvalidInput(format!("not a GO accession: {s}")));
        };
        Ok(GoTermId {
            inner: number.parse::<u32>()?,
        })
    }
}

impl FromStr for GoTermId {
    type Err = GoeaError;
    fn from_str(s: &str) -> GoeaResult<Self> {
        GoTermId::try_from(s)
    }
}

impl From<u32> for GoTermId {
    fn from(inner: u32) -> Self {
        Self { inner }
    }
}

impl Debug for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoTermId({self})")
    }
}

impl Display for GoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GO:{:07}", self.inner)
    }
}

impl PartialEq<str> for GoTermId {
    fn eq(&self, other: &str) -> bool {
        GoTermId::try_from(other).map_or(false, |other| *self == other)
    }
}

impl PartialEq<&str> for GoTermId {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_and_display() {
        let id = GoTermId::try_from("GO:0000001").unwrap();
        assert_eq!(id.as_u32(), 1);
        assert_eq!(id.to_string(), "GO:0000001");

        let id: GoTermId = "GO:2001317".parse().unwrap();
        assert_eq!(id.to_string(), "GO:2001317");
    }

    #[test]
    fn surrounding_whitespace() {
        let id = GoTermId::try_from(" GO:0005515\n").unwrap();
        assert_eq!(id, GoTermId::from(5515u32));
    }

    #[test]
    fn invalid_ids() {
        assert!(matches!(
            GoTermId::try_from("0005515"),
            Err(GoeaError::InvalidInput(_))
        ));
        assert!(matches!(
            GoTermId::try_from("GO:00055A5"),
            Err(GoeaError::ParseIntError)
        ));
        assert!(GoTermId::try_from("GO:").is_err());
    }

    #[test]
    fn compare_to_str() {
        let id = GoTermId::from(5515u32);
        assert_eq!(id, "GO:0005515");
        assert!(id != "GO:0005516");
        assert!(id != "foobar");
    }

    #[test]
    fn ordering_follows_numbers() {
        let mut ids = vec![
            GoTermId::from(30u32),
            GoTermId::from(2u32),
            GoTermId::from(100u32),
        ];
        ids.sort();
        assert_eq!(ids[0].as_u32(), 2);
        assert_eq!(ids[2].as_u32(), 100);
    }
}
