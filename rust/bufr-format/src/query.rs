//! Query paths addressing values within a decoded message.
//!
//! A query path has the form `subset/MNEMONIC/MNEMONIC[index]/...`, where the leading
//! `subset` component is either a subset name or `*` (any subset) and each following
//! component names a sequence or element, optionally qualified by a 1-based occurrence
//! index. The bare subset (for instance `*`) addresses the message itself and is used as
//! the path of the outermost (per-message) dimension.

use std::fmt;

use bufr_common::{Result, error::Error};

/// Subset component matching any subset.
pub const ANY_SUBSET: &str = "*";

/// One `/`-separated component of a query path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryComponent {
    pub mnemonic: String,
    pub index: Option<usize>,
}

impl fmt::Display for QueryComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.mnemonic, index),
            None => f.write_str(&self.mnemonic),
        }
    }
}

/// A parsed query path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    subset: String,
    components: Vec<QueryComponent>,
    text: String,
}

impl Query {
    /// Parses a query string.
    ///
    /// Whitespace around the whole string is ignored. Every component must be
    /// non-empty and consist of ASCII alphanumerics or `_`; an index, when present,
    /// must be a positive integer enclosed in brackets at the end of the component.
    pub fn parse(query: &str) -> Result<Query> {
        let parts = Self::split_path(query.trim())?;
        let (subset, rest) = parts
            .split_first()
            .ok_or_else(|| Error::invalid_arg("query", "empty query"))?;

        if subset != ANY_SUBSET && !is_mnemonic(subset) {
            return Err(Error::invalid_arg(
                "query",
                format!("invalid subset '{subset}' in '{query}'"),
            ));
        }

        let components = rest
            .iter()
            .map(|part| parse_component(part, query))
            .collect::<Result<Vec<_>>>()?;

        Ok(Query::from_parts(subset.clone(), components))
    }

    /// The query addressing a whole message of any subset (`*`).
    pub fn root() -> Query {
        Query::from_parts(ANY_SUBSET.to_string(), Vec::new())
    }

    fn from_parts(subset: String, components: Vec<QueryComponent>) -> Query {
        let mut text = subset.clone();
        for component in &components {
            text.push('/');
            text.push_str(&component.to_string());
        }
        Query {
            subset,
            components,
            text,
        }
    }

    /// Splits a query string into its `/`-separated components.
    pub fn split_path(query: &str) -> Result<Vec<String>> {
        if query.is_empty() {
            return Err(Error::invalid_arg("query", "empty query"));
        }
        query
            .split('/')
            .map(|part| {
                if part.is_empty() {
                    Err(Error::invalid_arg(
                        "query",
                        format!("empty component in '{query}'"),
                    ))
                } else {
                    Ok(part.to_string())
                }
            })
            .collect()
    }

    pub fn subset(&self) -> &str {
        &self.subset
    }

    pub fn components(&self) -> &[QueryComponent] {
        &self.components
    }

    /// The mnemonic of the last component, or the subset for a bare subset query.
    pub fn leaf(&self) -> &str {
        self.components
            .last()
            .map(|c| c.mnemonic.as_str())
            .unwrap_or(&self.subset)
    }

    /// Canonical string form of the query.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns `true` if this query addresses an ancestor of (or the same node as)
    /// `other`: same subset and a component-wise prefix.
    pub fn is_prefix_of(&self, other: &Query) -> bool {
        self.subset == other.subset
            && self.components.len() <= other.components.len()
            && self
                .components
                .iter()
                .zip(other.components.iter())
                .all(|(a, b)| a == b)
    }

    /// Returns a new query with `component` appended.
    pub fn child(&self, mnemonic: impl Into<String>) -> Query {
        let mut components = self.components.clone();
        components.push(QueryComponent {
            mnemonic: mnemonic.into(),
            index: None,
        });
        Query::from_parts(self.subset.clone(), components)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::str::FromStr for Query {
    type Err = Error;

    fn from_str(s: &str) -> Result<Query> {
        Query::parse(s)
    }
}

fn is_mnemonic(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_component(part: &str, query: &str) -> Result<QueryComponent> {
    let (mnemonic, index) = match part.find('[') {
        Some(open) => {
            let Some(inner) = part[open + 1..].strip_suffix(']') else {
                return Err(Error::invalid_arg(
                    "query",
                    format!("unterminated index in '{query}'"),
                ));
            };
            let index = inner.parse::<usize>().ok().filter(|&i| i > 0).ok_or_else(|| {
                Error::invalid_arg("query", format!("invalid index '{inner}' in '{query}'"))
            })?;
            (&part[..open], Some(index))
        }
        None => (part, None),
    };

    if !is_mnemonic(mnemonic) {
        return Err(Error::invalid_arg(
            "query",
            format!("invalid component '{part}' in '{query}'"),
        ));
    }

    Ok(QueryComponent {
        mnemonic: mnemonic.to_string(),
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let query = Query::parse("*/BRITCSTC/TMBR").unwrap();
        assert_eq!(query.subset(), "*");
        assert_eq!(query.components().len(), 2);
        assert_eq!(query.leaf(), "TMBR");
        assert_eq!(query.as_str(), "*/BRITCSTC/TMBR");
        assert!(!query.is_root());
    }

    #[test]
    fn test_parse_index_and_subset() {
        let query = Query::parse(" NC021023/ROSEQ1[2]/CLAT ").unwrap();
        assert_eq!(query.subset(), "NC021023");
        assert_eq!(query.components()[0].mnemonic, "ROSEQ1");
        assert_eq!(query.components()[0].index, Some(2));
        assert_eq!(query.to_string(), "NC021023/ROSEQ1[2]/CLAT");
    }

    #[test]
    fn test_parse_errors() {
        assert!(Query::parse("").is_err());
        assert!(Query::parse("*//CLAT").is_err());
        assert!(Query::parse("*/CLAT/").is_err());
        assert!(Query::parse("*/CL AT").is_err());
        assert!(Query::parse("*/ROSEQ1[0]").is_err());
        assert!(Query::parse("*/ROSEQ1[x]").is_err());
        assert!(Query::parse("*/ROSEQ1[2").is_err());
        assert!(Query::parse("a-b/CLAT").is_err());
    }

    #[test]
    fn test_root_and_prefix() {
        let root = Query::root();
        assert!(root.is_root());
        assert_eq!(root.as_str(), "*");

        let seq = Query::parse("*/ROSEQ1").unwrap();
        let leaf = Query::parse("*/ROSEQ1/CLAT").unwrap();
        assert!(root.is_prefix_of(&seq));
        assert!(seq.is_prefix_of(&leaf));
        assert!(seq.is_prefix_of(&seq));
        assert!(!leaf.is_prefix_of(&seq));
        assert!(!Query::parse("NC001/ROSEQ1").unwrap().is_prefix_of(&leaf));
        assert_eq!(seq.child("CLAT"), leaf);
    }
}
