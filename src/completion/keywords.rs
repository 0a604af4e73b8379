/*!
 * Packaged SQL keyword table
 *
 * `resources/keywords.tsv` ships inside the binary. Each line holds five
 * tab-separated fields: the keyword, its kind, and three reference columns
 * the lister does not use.
 */

use crate::error::{AdapterError, Result};
use std::sync::OnceLock;

const KEYWORDS_TSV: &str = include_str!("../../resources/keywords.tsv");

const FIELDS_PER_LINE: usize = 5;

static KEYWORDS: OnceLock<Vec<Keyword>> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub name: String,
    /// `reserved`, `non-reserved`, `reserved (can be function or type)`, ...
    pub kind: String,
}

impl Keyword {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.kind.starts_with("reserved")
    }
}

/// The packaged keyword table, parsed on first use
pub fn keywords() -> Result<&'static [Keyword]> {
    if let Some(table) = KEYWORDS.get() {
        return Ok(table);
    }
    let parsed = parse_keywords(KEYWORDS_TSV)?;
    Ok(KEYWORDS.get_or_init(|| parsed))
}

/// Parse keyword lines; blank lines are skipped
pub fn parse_keywords(source: &str) -> Result<Vec<Keyword>> {
    let mut table = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != FIELDS_PER_LINE {
            return Err(AdapterError::Configuration(format!(
                "keyword table line {}: expected {} tab-separated fields, found {}",
                index + 1,
                FIELDS_PER_LINE,
                fields.len()
            )));
        }
        if fields[0].is_empty() {
            return Err(AdapterError::Configuration(format!(
                "keyword table line {}: empty keyword",
                index + 1
            )));
        }
        table.push(Keyword::new(fields[0], fields[1]));
    }

    if table.is_empty() {
        return Err(AdapterError::Configuration(
            "keyword table is empty".to_string(),
        ));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packaged_table_loads() {
        let table = keywords().unwrap();
        assert!(table.iter().any(|k| k.name == "SELECT" && k.is_reserved()));
        assert!(table.iter().any(|k| k.name == "SHOW" && !k.is_reserved()));
        // Second call hands back the same table
        assert!(std::ptr::eq(table, keywords().unwrap()));
    }

    #[test]
    fn test_parse_kinds() {
        let table = parse_keywords(
            "JOIN\treserved (can be function or type)\treserved\treserved\treserved\n\
             \n\
             ABORT\tnon-reserved\t\t\t\n",
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert!(table[0].is_reserved());
        assert!(!table[1].is_reserved());
    }

    #[test]
    fn test_malformed_line() {
        let err = parse_keywords("SELECT\treserved\n").unwrap_err();
        assert_eq!(
            err,
            AdapterError::Configuration(
                "keyword table line 1: expected 5 tab-separated fields, found 2".to_string()
            )
        );
    }

    #[test]
    fn test_empty_table() {
        assert!(matches!(
            parse_keywords("\n\n"),
            Err(AdapterError::Configuration(_))
        ));
    }
}
