/*!
 * Interactive suggestion items
 *
 * What the REPL shows in its completion menu, with a category and a
 * relevance score used for ranking.
 */

use super::lister::CompletionEntry;
use crate::catalog::CatalogNode;

/// Suggestion shown in the completion menu
#[derive(Clone, Debug, PartialEq)]
pub struct Suggestion {
    /// Text inserted on selection
    pub text: String,
    pub description: String,
    pub category: SuggestionCategory,
    /// Relevance score (0-100)
    pub relevance: u8,
    /// Priority carried over from the completion entry, lower first
    pub priority: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionCategory {
    Database,
    Table,
    Column,
    Keyword,
    Function,
    Aggregate,
    Command,
}

impl Suggestion {
    pub fn new(
        text: String,
        description: String,
        category: SuggestionCategory,
        relevance: u8,
        priority: u32,
    ) -> Self {
        Self {
            text,
            description,
            category,
            relevance: relevance.min(100),
            priority,
        }
    }

    pub fn format_display(&self) -> String {
        format!("{} {} - {}", self.category.icon(), self.text, self.description)
    }

    pub fn database(node: &CatalogNode, relevance: u8) -> Self {
        Self::new(
            node.query_name.clone(),
            format!("database {}", node.label),
            SuggestionCategory::Database,
            relevance,
            0,
        )
    }

    pub fn table(node: &CatalogNode, relevance: u8) -> Self {
        Self::new(
            node.query_name.clone(),
            format!("table {}", node.label),
            SuggestionCategory::Table,
            relevance,
            0,
        )
    }

    pub fn column(node: &CatalogNode, table: &CatalogNode, relevance: u8) -> Self {
        Self::new(
            node.query_name.clone(),
            format!("{} column of {}", node.type_label, table.label),
            SuggestionCategory::Column,
            relevance,
            0,
        )
    }

    pub fn entry(entry: &CompletionEntry, relevance: u8) -> Self {
        let (category, description) = match entry.type_label.as_str() {
            "agg" => (SuggestionCategory::Aggregate, "aggregate function"),
            "fn" => (SuggestionCategory::Function, "function"),
            _ => (SuggestionCategory::Keyword, "keyword"),
        };
        Self::new(
            entry.value.clone(),
            description.to_string(),
            category,
            relevance,
            entry.priority,
        )
    }

    pub fn command(command: &str, description: &str, relevance: u8) -> Self {
        Self::new(
            command.to_string(),
            description.to_string(),
            SuggestionCategory::Command,
            relevance,
            0,
        )
    }
}

impl SuggestionCategory {
    pub fn icon(&self) -> &'static str {
        match self {
            SuggestionCategory::Database => "db",
            SuggestionCategory::Table => "t",
            SuggestionCategory::Column => "c",
            SuggestionCategory::Keyword => "kw",
            SuggestionCategory::Function => "fn",
            SuggestionCategory::Aggregate => "agg",
            SuggestionCategory::Command => "cmd",
        }
    }
}
