/*!
 * Interactive suggestion engine
 *
 * Host-side matching over the latest metadata snapshot:
 * - Analyzing input context
 * - Picking databases, tables, columns, keywords or functions
 * - Ranking by prefix relevance, then entry priority
 */

use super::metadata::SessionMetadata;
use super::suggestion::Suggestion;
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

const MAX_COLUMNS: usize = 50;

/// Input context analysis result
#[derive(Debug, PartialEq)]
pub enum InputContext {
    /// USE command
    UseCommand,
    /// FROM / JOIN target
    FromClause,
    /// SELECT list before any FROM
    SelectClause,
    /// WHERE / HAVING / ON predicates
    WhereClause,
    General,
}

pub struct SuggestionEngine {
    metadata: Arc<Mutex<SessionMetadata>>,
    current_database: Arc<Mutex<Option<String>>>,
}

impl SuggestionEngine {
    pub fn new(metadata: Arc<Mutex<SessionMetadata>>) -> Self {
        Self {
            metadata,
            current_database: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_current_database(&self, database: Option<String>) {
        if let Ok(mut current_db) = self.current_database.lock() {
            *current_db = database;
        }
    }

    fn current_database(&self) -> Option<String> {
        self.current_database.lock().ok().and_then(|db| db.clone())
    }

    /// Ranked suggestions for `word`, the partial token ending `line`
    pub fn get_suggestions(&self, line: &str, word: &str) -> Vec<Suggestion> {
        let line_upper = line.to_uppercase();
        let word_lower = word.to_lowercase();

        // A refresh holding the lock means no suggestions this time
        let metadata = match self.metadata.try_lock() {
            Ok(metadata) => metadata,
            Err(_) => return Vec::new(),
        };

        let mut suggestions = match self.analyze_context(&line_upper) {
            InputContext::UseCommand => self.database_suggestions(&metadata, &word_lower),
            InputContext::FromClause => self.table_suggestions(&metadata, &word_lower),
            InputContext::SelectClause | InputContext::WhereClause => {
                let mut found = self.column_suggestions(&metadata, &line_upper, &word_lower);
                found.extend(self.entry_suggestions(&metadata, &word_lower));
                found
            }
            InputContext::General => {
                let mut found = self.entry_suggestions(&metadata, &word_lower);
                if word.is_empty() {
                    found.extend(common_commands());
                }
                found
            }
        };

        suggestions.sort_by(rank);
        suggestions
    }

    /// Classify what the user is typing
    pub fn analyze_context(&self, line: &str) -> InputContext {
        let line = line.to_uppercase();
        let words: Vec<&str> = line.split_whitespace().collect();

        if words.first() == Some(&"USE") {
            return InputContext::UseCommand;
        }

        let last = words.last().copied();
        let previous = if line.ends_with(char::is_whitespace) {
            last
        } else if words.len() >= 2 {
            Some(words[words.len() - 2])
        } else {
            None
        };
        let table_position = |word: Option<&str>| {
            matches!(word, Some("FROM" | "JOIN" | "INTO" | "UPDATE" | "TABLE"))
        };
        if table_position(last) || table_position(previous) {
            return InputContext::FromClause;
        }

        if words
            .iter()
            .any(|w| matches!(*w, "WHERE" | "HAVING" | "ON"))
        {
            return InputContext::WhereClause;
        }

        if words.contains(&"SELECT") && !words.contains(&"FROM") {
            return InputContext::SelectClause;
        }

        InputContext::General
    }

    /// Calculate matching relevance
    pub fn calculate_relevance(&self, item: &str, word: &str, base_score: u8) -> u8 {
        if word.is_empty() {
            return base_score;
        }

        let item_lower = item.to_lowercase();
        let word_lower = word.to_lowercase();

        if item_lower == word_lower {
            100
        } else if item_lower.starts_with(&word_lower) {
            95
        } else if item_lower.contains(&word_lower) {
            (base_score + 5).min(85)
        } else {
            base_score.saturating_sub(10)
        }
    }

    fn database_suggestions(&self, metadata: &SessionMetadata, word: &str) -> Vec<Suggestion> {
        metadata
            .databases()
            .filter(|db| db.label.to_lowercase().starts_with(word))
            .map(|db| Suggestion::database(db, self.calculate_relevance(&db.label, word, 90)))
            .collect()
    }

    /// Tables match on their bare name or their qualified path
    fn table_suggestions(&self, metadata: &SessionMetadata, word: &str) -> Vec<Suggestion> {
        let current_db = self.current_database();
        metadata
            .tables()
            .into_iter()
            .filter(|(_, table)| {
                table.label.to_lowercase().starts_with(word)
                    || table.query_name.to_lowercase().starts_with(word)
            })
            .map(|(db, table)| {
                let relevance = if current_db.as_deref() == Some(db) {
                    95
                } else {
                    self.calculate_relevance(&table.label, word, 85)
                };
                Suggestion::table(table, relevance)
            })
            .collect()
    }

    /// Columns of the tables named in the query, or a few matching ones
    fn column_suggestions(
        &self,
        metadata: &SessionMetadata,
        query: &str,
        word: &str,
    ) -> Vec<Suggestion> {
        let table_names = extract_table_names(query);

        let mut suggestions = Vec::new();
        for (table, column) in metadata.columns() {
            let referenced = table_names.iter().any(|name| {
                name.eq_ignore_ascii_case(&table.label)
                    || name.eq_ignore_ascii_case(&table.query_name)
            });
            if !table_names.is_empty() && !referenced {
                continue;
            }
            if !column.label.to_lowercase().starts_with(word) {
                continue;
            }
            let base = if referenced { 90 } else { 80 };
            suggestions.push(Suggestion::column(
                column,
                table,
                self.calculate_relevance(&column.label, word, base),
            ));
            if suggestions.len() >= MAX_COLUMNS {
                break;
            }
        }
        suggestions
    }

    fn entry_suggestions(&self, metadata: &SessionMetadata, word: &str) -> Vec<Suggestion> {
        metadata
            .completions
            .iter()
            .filter(|entry| entry.label.to_lowercase().starts_with(word))
            .map(|entry| Suggestion::entry(entry, self.calculate_relevance(&entry.label, word, 65)))
            .collect()
    }
}

fn rank(a: &Suggestion, b: &Suggestion) -> Ordering {
    b.relevance
        .cmp(&a.relevance)
        .then(a.priority.cmp(&b.priority))
        .then_with(|| a.text.cmp(&b.text))
}

/// Table names following FROM / JOIN in an upper-cased query
fn extract_table_names(query: &str) -> Vec<String> {
    let words: Vec<&str> = query.split_whitespace().collect();
    words
        .windows(2)
        .filter(|pair| pair[0] == "FROM" || pair[0] == "JOIN")
        .map(|pair| pair[1].trim_matches(|c: char| c == '`' || c == '"' || c == ',' || c == ';'))
        .filter(|name| !name.is_empty() && !matches!(*name, "SELECT" | "WHERE" | "("))
        .map(str::to_string)
        .collect()
}

fn common_commands() -> Vec<Suggestion> {
    vec![
        Suggestion::command("SELECT * FROM", "query all rows of a table", 60),
        Suggestion::command("SHOW DATABASES", "list databases", 58),
        Suggestion::command("SHOW TABLES", "list tables in the current database", 56),
        Suggestion::command("USE", "switch database", 54),
        Suggestion::command("DESCRIBE", "show table structure", 52),
    ]
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
