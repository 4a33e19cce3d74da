use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::trace;

use crate::{GoDomain, GoTermId, GoeaError, GoeaResult, DEFAULT_LOOKUP_TIMEOUT, QUICKGO_TERM_URL};

/// A source of GO domains, e.g. a remote ontology service
///
/// Implementors return `Ok(None)` if the source does not know the term
/// and an error if the source could not be queried.
pub trait DomainLookup: Send + Sync {
    /// Returns the domain of `term`
    ///
    /// # Errors
    ///
    /// Any error of the underlying source, usually [`GoeaError::Lookup`]
    fn lookup(&self, term: GoTermId) -> GoeaResult<Option<GoDomain>>;
}

/// Looks up GO domains from an OBO-XML web service
///
/// The HTTP transport is provided by the caller as a function that
/// returns the response body of a URL. The lookup builds the URL of the
/// term and extracts its namespace from the `/obo/term/namespace` element.
///
/// # Examples
///
/// ```
/// use goea::domain::{DomainLookup, OboXmlLookup};
/// use goea::{GoDomain, GoTermId};
///
/// let lookup = OboXmlLookup::new(|url: &str| {
///     assert!(url.ends_with("GO:0016020"));
///     Ok("<obo><term><namespace>cellular_component</namespace></term></obo>".to_string())
/// });
///
/// let domain = lookup.lookup(GoTermId::from(16020u32)).unwrap();
/// assert_eq!(domain, Some(GoDomain::CellularComponent));
/// ```
pub struct OboXmlLookup<F> {
    base_url: String,
    fetch: F,
}

impl<F> OboXmlLookup<F>
where
    F: Fn(&str) -> GoeaResult<String> + Send + Sync,
{
    /// Uses the QuickGO service
    pub fn new(fetch: F) -> Self {
        Self::with_base_url(QUICKGO_TERM_URL, fetch)
    }

    /// Uses a custom service, the GO accession is appended to `base_url`
    pub fn with_base_url(base_url: &str, fetch: F) -> Self {
        Self {
            base_url: base_url.to_string(),
            fetch,
        }
    }

    /// The URL of `term`
    pub fn url(&self, term: GoTermId) -> String {
        format!("{}{}", self.base_url, term)
    }
}

impl<F> DomainLookup for OboXmlLookup<F>
where
    F: Fn(&str) -> GoeaResult<String> + Send + Sync,
{
    fn lookup(&self, term: GoTermId) -> GoeaResult<Option<GoDomain>> {
        let url = self.url(term);
        trace!("Fetching {}", url);
        let body = (self.fetch)(&url)?;
        parse_obo_xml_namespace(&body)
            .map(str::parse::<GoDomain>)
            .transpose()
    }
}

/// Limits the duration of another [`DomainLookup`]
///
/// Each lookup runs on its own thread. If it does not finish in time,
/// [`GoeaError::Timeout`] is returned and the thread is left to finish
/// in the background, its result is discarded.
pub struct TimeoutLookup<L> {
    inner: Arc<L>,
    timeout: Duration,
}

impl<L: DomainLookup + 'static> TimeoutLookup<L> {
    /// Wraps `inner` with [`DEFAULT_LOOKUP_TIMEOUT`]
    pub fn new(inner: L) -> Self {
        Self::with_timeout(inner, DEFAULT_LOOKUP_TIMEOUT)
    }

    /// Wraps `inner` with a custom timeout
    pub fn with_timeout(inner: L, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout,
        }
    }
}

impl<L: DomainLookup + 'static> DomainLookup for TimeoutLookup<L> {
    fn lookup(&self, term: GoTermId) -> GoeaResult<Option<GoDomain>> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        thread::Builder::new()
            .name(format!("lookup-{term}"))
            .spawn(move || {
                // the receiver is gone if the lookup timed out
                let _ = tx.send(inner.lookup(term));
            })
            .map_err(|err| GoeaError::Lookup(err.to_string()))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(GoeaError::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                Err(GoeaError::Lookup(format!("lookup of {term} did not finish")))
            }
        }
    }
}

/// Extracts the text of `/obo/term/namespace` from an OBO-XML document
///
/// Returns `None` if the element is not present.
///
/// ```
/// use goea::domain::parse_obo_xml_namespace;
///
/// let xml = r#"<?xml version="1.0"?>
/// <obo>
///   <term>
///     <id>GO:0006915</id>
///     <name>apoptotic process</name>
///     <namespace>biological_process</namespace>
///   </term>
/// </obo>"#;
///
/// assert_eq!(parse_obo_xml_namespace(xml), Some("biological_process"));
/// assert_eq!(parse_obo_xml_namespace("<obo></obo>"), None);
/// ```
pub fn parse_obo_xml_namespace(xml: &str) -> Option<&str> {
    const TARGET: [&str; 3] = ["obo", "term", "namespace"];

    let mut path: Vec<&str> = Vec::with_capacity(8);
    let mut rest = xml;
    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];

        if let Some(comment) = after.strip_prefix("!--") {
            let end = comment.find("-->")?;
            rest = &comment[end + 3..];
            continue;
        }

        let end = after.find('>')?;
        let tag = after[..end].trim();
        rest = &after[end + 1..];

        if tag.starts_with('?') || tag.starts_with('!') {
            continue;
        }
        if let Some(name) = tag.strip_prefix('/') {
            if path.last() == Some(&name.trim()) {
                path.pop();
            }
            continue;
        }
        if tag.ends_with('/') {
            continue;
        }

        let name = tag.split_whitespace().next().unwrap_or_default();
        path.push(name);
        if path == TARGET {
            let text_end = rest.find('<').unwrap_or(rest.len());
            return Some(rest[..text_end].trim());
        }
    }
    None
}
