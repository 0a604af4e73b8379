/*!
 * Databend catalog introspection
 *
 * Builds the database → schema → table → column tree a host shows in its
 * navigation pane:
 * - Node and snapshot types
 * - Metadata query construction
 * - Typed metadata rows
 * - Short type tags for columns
 */

pub mod builder;
pub mod queries;
pub mod rows;
pub mod types;

pub use builder::build_catalog;
pub use types::shorten;

/// One entry in the catalog tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogNode {
    /// Dot-joined path, unique within one snapshot
    pub qualified_identifier: String,
    /// Text spliced into generated queries
    pub query_name: String,
    /// Display name, the last path segment
    pub label: String,
    /// Short tag: `db`, `s`, a table tag, or a column type glyph
    pub type_label: String,
    pub children: Vec<CatalogNode>,
}

impl CatalogNode {
    pub fn database(name: &str, schemas: Vec<CatalogNode>) -> Self {
        Self {
            qualified_identifier: name.to_string(),
            query_name: name.to_string(),
            label: name.to_string(),
            type_label: "db".to_string(),
            children: schemas,
        }
    }

    pub fn schema(database: &str, name: &str, tables: Vec<CatalogNode>) -> Self {
        let path = format!("{}.{}", database, name);
        Self {
            qualified_identifier: path.clone(),
            query_name: path,
            label: name.to_string(),
            type_label: "s".to_string(),
            children: tables,
        }
    }

    pub fn table(
        database: &str,
        schema: &str,
        name: &str,
        type_label: &str,
        columns: Vec<CatalogNode>,
    ) -> Self {
        let path = format!("{}.{}.{}", database, schema, name);
        Self {
            qualified_identifier: path.clone(),
            query_name: path,
            label: name.to_string(),
            type_label: type_label.to_string(),
            children: columns,
        }
    }

    /// Column nodes are queried by their bare name
    pub fn column(table_path: &str, name: &str, type_label: &str) -> Self {
        Self {
            qualified_identifier: format!("{}.{}", table_path, name),
            query_name: name.to_string(),
            label: name.to_string(),
            type_label: type_label.to_string(),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(CatalogNode::node_count).sum::<usize>()
    }
}

/// Immutable snapshot of the whole tree, one root per database
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub items: Vec<CatalogNode>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogNode>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.items.iter().map(CatalogNode::node_count).sum()
    }

    /// Depth-first, pre-order walk with the depth of each node
    pub fn iter(&self) -> CatalogIter<'_> {
        CatalogIter {
            stack: self.items.iter().rev().map(|node| (0, node)).collect(),
        }
    }

    pub fn find(&self, qualified_identifier: &str) -> Option<&CatalogNode> {
        self.iter()
            .map(|(_, node)| node)
            .find(|node| node.qualified_identifier == qualified_identifier)
    }
}

pub struct CatalogIter<'a> {
    stack: Vec<(usize, &'a CatalogNode)>,
}

impl<'a> Iterator for CatalogIter<'a> {
    type Item = (usize, &'a CatalogNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}
