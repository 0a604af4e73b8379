/*!
 * Metadata snapshot behind interactive completion
 *
 * Holds the latest catalog and completion list. Both are rebuilt in full on
 * every refresh; nothing expires or updates incrementally.
 */

use super::lister::{list_completions, CompletionEntry};
use crate::catalog::{build_catalog, Catalog, CatalogNode};
use crate::error::Result;
use crate::session::Session;

#[derive(Debug, Default)]
pub struct SessionMetadata {
    pub catalog: Catalog,
    pub completions: Vec<CompletionEntry>,
}

impl SessionMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(catalog: Catalog, completions: Vec<CompletionEntry>) -> Self {
        Self {
            catalog,
            completions,
        }
    }

    /// Rebuild the catalog and the completion list from the session
    ///
    /// The previous snapshot is kept if either build fails.
    pub fn refresh<S: Session + ?Sized>(&mut self, session: &mut S) -> Result<()> {
        let catalog = build_catalog(session)?;
        let completions = list_completions(session)?;
        self.catalog = catalog;
        self.completions = completions;
        Ok(())
    }

    pub fn databases(&self) -> impl Iterator<Item = &CatalogNode> {
        self.catalog.items.iter()
    }

    /// Every table node with its database name
    pub fn tables(&self) -> Vec<(&str, &CatalogNode)> {
        let mut tables = Vec::new();
        for db in &self.catalog.items {
            for schema in &db.children {
                for table in &schema.children {
                    tables.push((db.label.as_str(), table));
                }
            }
        }
        tables
    }

    /// Every column node with the table node it belongs to
    pub fn columns(&self) -> Vec<(&CatalogNode, &CatalogNode)> {
        self.tables()
            .into_iter()
            .flat_map(|(_, table)| table.children.iter().map(move |column| (table, column)))
            .collect()
    }
}
