//! Parsing the background annotation files
//!
//! The background of an enrichment analysis is usually downloaded per
//! species, e.g. from Ensembl BioMart. It consists of
//!
//! - a mapping of protein accessions to GO accessions (and term names),
//!   see [`go_mapping`]
//! - optionally, a separate table of GO accessions to term names,
//!   see [`term_names`]

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::{GoeaError, GoeaResult};

/// Module to parse protein - GO term mapping files
pub mod go_mapping {
    use std::io::BufRead;
    use std::path::Path;

    use tracing::trace;

    use crate::annotations::BackgroundBuilder;
    use crate::parser::{open, remove_header};
    use crate::{GoDomain, GoTermId, GoeaError, GoeaResult};

    struct ParsedMapping<'a> {
        protein: &'a str,
        term: GoTermId,
        name: Option<&'a str>,
        domain: Option<GoDomain>,
    }

    /// Parses a single line of the mapping file
    ///
    /// Returns `None` for proteins without GO annotation
    fn parse_line(line: &str) -> GoeaResult<Option<ParsedMapping<'_>>> {
        let mut cols = line.trim_end_matches(['\r', '\n']).split('\t');

        // Column 1 is the protein accession
        let protein = match cols.next().map(str::trim) {
            Some(protein) if !protein.is_empty() => protein,
            _ => return Err(GoeaError::InvalidInput(line.to_string())),
        };

        // Column 2 is the GO accession, empty if the protein has no GO term
        let term = match cols.next().map(str::trim) {
            None | Some("") => return Ok(None),
            Some(term) => GoTermId::try_from(term)?,
        };

        // Column 3 is the GO term name
        let name = cols.next().map(str::trim).filter(|name| !name.is_empty());

        // Column 4 is the optional GO domain
        let domain = match cols.next().map(str::trim) {
            None | Some("") => None,
            Some(domain) => Some(domain.parse::<GoDomain>()?),
        };

        Ok(Some(ParsedMapping {
            protein,
            term,
            name,
            domain,
        }))
    }

    /// Parses a mapping file and adds all annotations to `builder`
    ///
    /// ```text
    /// UniProtKB/Swiss-Prot ID GO term accession   GO term name    GO domain
    /// P04637  GO:0005515  protein binding molecular_function
    /// P04637  GO:0006915  apoptotic process   biological_process
    /// Q9Y6K9
    /// ```
    ///
    /// # Errors
    ///
    /// - [`GoeaError::CannotOpenFile`]: Source file not present or can't be opened
    /// - [`GoeaError::InvalidInput`]: Missing header or malformed line
    /// - [`GoeaError::ParseIntError`]: A line contains an invalid GO accession
    pub fn parse_file<P: AsRef<Path>>(file: P, builder: &mut BackgroundBuilder) -> GoeaResult<()> {
        let mut reader = open(file)?;
        parse(&mut reader, builder)
    }

    /// Same as [`parse_file`], reading from any buffered reader
    ///
    /// # Errors
    ///
    /// - [`GoeaError::InvalidInput`]: Missing header or malformed line
    /// - [`GoeaError::ParseIntError`]: A line contains an invalid GO accession
    pub fn parse<R: BufRead>(reader: &mut R, builder: &mut BackgroundBuilder) -> GoeaResult<()> {
        remove_header(reader, |header| {
            header.starts_with('#') || header.to_ascii_lowercase().contains("accession")
        })?;

        for line in reader.lines() {
            let line = line.map_err(|_| {
                GoeaError::InvalidInput("Invalid data in GO mapping file".to_string())
            })?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let Some(mapping) = parse_line(&line)? else {
                trace!("Protein without GO annotation: {}", line.trim());
                continue;
            };
            builder.add_annotation(mapping.protein, mapping.term);
            if let Some(name) = mapping.name {
                builder.add_term(mapping.term, name);
            }
            if let Some(domain) = mapping.domain {
                builder.set_domain(mapping.term, domain);
            }
        }
        Ok(())
    }

}

/// Module to parse GO accession - term name tables
pub mod term_names {
    use std::io::BufRead;
    use std::path::Path;

    use crate::annotations::BackgroundBuilder;
    use crate::parser::open;
    use crate::{GoDomain, GoTermId, GoeaError, GoeaResult};

    struct ParsedTerm<'a> {
        id: GoTermId,
        name: &'a str,
        domain: Option<GoDomain>,
    }

    fn parse_line(line: &str) -> GoeaResult<ParsedTerm<'_>> {
        let mut cols = line.trim_end_matches(['\r', '\n']).split('\t');

        let Some(id) = cols.next() else {
            return Err(GoeaError::InvalidInput(line.to_string()));
        };
        let id = GoTermId::try_from(id)?;

        let name = match cols.next().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return Err(GoeaError::InvalidInput(line.to_string())),
        };

        let domain = match cols.next().map(str::trim) {
            None | Some("") => None,
            Some(domain) => Some(domain.parse::<GoDomain>()?),
        };

        Ok(ParsedTerm { id, name, domain })
    }

    /// Parses a term name table and adds all names to `builder`
    ///
    /// ```text
    /// # GO accession    name    namespace
    /// GO:0005515  protein binding molecular_function
    /// GO:0016020  membrane
    /// ```
    ///
    /// # Errors
    ///
    /// - [`GoeaError::CannotOpenFile`]: Source file not present or can't be opened
    /// - [`GoeaError::InvalidInput`]: A line is malformed
    /// - [`GoeaError::ParseIntError`]: A line contains an invalid GO accession
    pub fn parse_file<P: AsRef<Path>>(file: P, builder: &mut BackgroundBuilder) -> GoeaResult<()> {
        let mut reader = open(file)?;
        parse(&mut reader, builder)
    }

    /// Same as [`parse_file`], reading from any buffered reader
    ///
    /// # Errors
    ///
    /// - [`GoeaError::InvalidInput`]: A line is malformed
    /// - [`GoeaError::ParseIntError`]: A line contains an invalid GO accession
    pub fn parse<R: BufRead>(reader: &mut R, builder: &mut BackgroundBuilder) -> GoeaResult<()> {
        for line in reader.lines() {
            let line = line.map_err(|_| {
                GoeaError::InvalidInput("Invalid data in GO term table".to_string())
            })?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let term = parse_line(&line)?;
            builder.add_term(term.id, term.name);
            if let Some(domain) = term.domain {
                builder.set_domain(term.id, domain);
            }
        }
        Ok(())
    }

    #[cfg(test)]
    mod test_term_names {
        use std::io::BufReader;

        use super::*;

        #[test]
        fn correct_lines() {
            let term = parse_line("GO:0016020\tmembrane").unwrap();
            assert_eq!(term.id, "GO:0016020");
            assert_eq!(term.name, "membrane");
            assert!(term.domain.is_none());

            let term = parse_line("GO:0016020\tmembrane\tcellular_component\n").unwrap();
            assert_eq!(term.domain, Some(GoDomain::CellularComponent));
        }

        #[test]
        fn invalid_lines() {
            assert!(parse_line("GO:0016020").is_err());
            assert!(parse_line("GO:0016020\t").is_err());
            assert!(parse_line("0016020\tmembrane").is_err());
        }

        #[test]
        fn names_override_accession_fallback() {
            let data = "# terms\nGO:0016020\tmembrane\tC\n\n".as_bytes();
            let mut builder = BackgroundBuilder::new();
            builder.species("Homo sapiens");
            parse(&mut BufReader::new(data), &mut builder).unwrap();
            builder.add_annotation("P1", 16020u32.into());
            let background = builder.build().unwrap();
            assert_eq!(background.metadata().name(&16020u32.into()), Some("membrane"));
            assert_eq!(
                background.metadata().domain(&16020u32.into()),
                Some(GoDomain::CellularComponent)
            );
        }
    }
}

/// Opens `file` for buffered reading
fn open<P: AsRef<Path>>(file: P) -> GoeaResult<BufReader<File>> {
    let filename = file.as_ref().display().to_string();
    let file = File::open(file).map_err(|_| GoeaError::CannotOpenFile(filename))?;
    Ok(BufReader::new(file))
}

/// Removes the first (header) line.
fn remove_header<R: BufRead, F: Fn(&str) -> bool>(reader: &mut R, is_header: F) -> GoeaResult<()> {
    let mut trash = String::with_capacity(80);
    reader
        .read_line(&mut trash)
        .map_err(|_| GoeaError::InvalidInput("Invalid data in header".to_string()))?;
    if !is_header(&trash) {
        return Err(GoeaError::InvalidInput(
            "GO mapping file must contain a header".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_remove_header() {
        let x = "#foobar\txyz\nP1\tGO:0000001\n".as_bytes();
        let mut reader = BufReader::new(x);
        assert!(remove_header(&mut reader, |h| h.starts_with('#')).is_ok());

        let mut lines = reader.lines();
        assert_eq!(lines.next().unwrap().unwrap(), "P1\tGO:0000001");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_remove_header_fails() {
        let x = "foobar\txyz\n".as_bytes();
        let mut reader = BufReader::new(x);
        assert!(remove_header(&mut reader, |h| h.starts_with('#')).is_err());
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            open("tests/does_not_exist.tsv"),
            Err(GoeaError::CannotOpenFile(_))
        ));
    }
}
