/*!
 * Completion list builder
 *
 * Merges the packaged keyword table with the live function list from
 * `system.functions` into one sorted list.
 */

use super::keywords::{keywords, Keyword};
use crate::catalog::queries;
use crate::catalog::rows::FunctionRow;
use crate::error::Result;
use crate::session::Session;

pub const RESERVED_KEYWORD_PRIORITY: u32 = 100;
pub const DEFAULT_PRIORITY: u32 = 1000;

/// One completion suggestion for the host
///
/// Ordering compares `label` first and then the remaining fields in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompletionEntry {
    pub label: String,
    /// `kw`, `fn` or `agg`
    pub type_label: String,
    pub value: String,
    /// Lower is shown first
    pub priority: u32,
    pub context: Option<String>,
}

impl CompletionEntry {
    pub fn keyword(keyword: &Keyword) -> Self {
        let label = keyword.name.to_lowercase();
        Self {
            value: label.clone(),
            label,
            type_label: "kw".to_string(),
            priority: if keyword.is_reserved() {
                RESERVED_KEYWORD_PRIORITY
            } else {
                DEFAULT_PRIORITY
            },
            context: None,
        }
    }

    pub fn function(function: &FunctionRow) -> Self {
        Self {
            label: function.name.clone(),
            type_label: if function.is_aggregate { "agg" } else { "fn" }.to_string(),
            value: function.name.clone(),
            priority: DEFAULT_PRIORITY,
            context: None,
        }
    }

    pub fn is_keyword(&self) -> bool {
        self.type_label == "kw"
    }
}

/// Completion list from the packaged keywords and the session's functions
pub fn list_completions<S: Session + ?Sized>(session: &mut S) -> Result<Vec<CompletionEntry>> {
    list_completions_with(keywords()?, session)
}

/// Completion list from an explicit keyword table
pub fn list_completions_with<S: Session + ?Sized>(
    keywords: &[Keyword],
    session: &mut S,
) -> Result<Vec<CompletionEntry>> {
    let mut completions: Vec<CompletionEntry> =
        keywords.iter().map(CompletionEntry::keyword).collect();

    let functions: Vec<FunctionRow> = session.execute(queries::LIST_FUNCTIONS)?.decode()?;
    completions.extend(functions.iter().map(CompletionEntry::function));

    completions.sort();
    Ok(completions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterError;
    use crate::session::{QueryResult, Value};

    fn functions(sql: &str) -> Result<QueryResult> {
        assert_eq!(sql, queries::LIST_FUNCTIONS);
        Ok(QueryResult::new(
            vec![],
            vec![
                vec![Value::text("sum"), Value::Bool(true)],
                vec![Value::text("ABS"), Value::Int(0)],
            ],
        ))
    }

    #[test]
    fn test_priorities_and_sorting() {
        let table = vec![
            Keyword::new("SELECT", "reserved"),
            Keyword::new("ABORT", "non-reserved"),
        ];
        let mut session = functions;
        let completions = list_completions_with(&table, &mut session).unwrap();

        assert_eq!(completions.len(), 4);
        let summary: Vec<(&str, &str, u32)> = completions
            .iter()
            .map(|c| (c.label.as_str(), c.type_label.as_str(), c.priority))
            .collect();
        // Byte order: upper-case function names sort before keywords
        assert_eq!(
            summary,
            vec![
                ("ABS", "fn", 1000),
                ("abort", "kw", 1000),
                ("select", "kw", 100),
                ("sum", "agg", 1000),
            ]
        );
        assert!(completions.iter().all(|c| c.context.is_none()));
        assert!(completions.iter().all(|c| c.label == c.value));
    }

    #[test]
    fn test_ties_broken_by_type_label() {
        let table = vec![Keyword::new("SUM", "non-reserved")];
        let mut session = functions;
        let completions = list_completions_with(&table, &mut session).unwrap();
        let sums: Vec<&str> = completions
            .iter()
            .filter(|c| c.label == "sum")
            .map(|c| c.type_label.as_str())
            .collect();
        assert_eq!(sums, vec!["agg", "kw"]);
    }

    #[test]
    fn test_function_query_failure_propagates() {
        let table = vec![Keyword::new("SELECT", "reserved")];
        let mut session =
            |_: &str| -> Result<QueryResult> { Err(AdapterError::query("connection reset")) };
        let err = list_completions_with(&table, &mut session).unwrap_err();
        assert_eq!(err, AdapterError::Query("connection reset".to_string()));
    }

    #[test]
    fn test_packaged_keywords_are_lowercased() {
        let mut session = |_: &str| -> Result<QueryResult> { Ok(QueryResult::default()) };
        let completions = list_completions(&mut session).unwrap();
        assert!(!completions.is_empty());
        assert!(completions
            .iter()
            .all(|c| c.is_keyword() && c.label == c.label.to_lowercase()));
        assert!(completions.windows(2).all(|w| w[0] <= w[1]));
        let select = completions.iter().find(|c| c.label == "select").unwrap();
        assert_eq!(select.priority, RESERVED_KEYWORD_PRIORITY);
    }
}
