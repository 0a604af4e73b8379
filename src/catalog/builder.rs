/*!
 * Catalog builder
 *
 * Walks databases, schemas, tables and columns with one blocking query per
 * level and node. Nothing is cached between calls and a failure at any level
 * aborts the whole build.
 */

use super::queries;
use super::rows::{ColumnRow, DatabaseRow, SchemaRow, TableRow};
use super::types::shorten;
use super::{Catalog, CatalogNode};
use crate::error::Result;
use crate::session::Session;

/// Tag given to every table node
pub const TABLE_TYPE_LABEL: &str = "t";

/// Build a full catalog snapshot from the session
///
/// Databases keep the order the server returns; schemas and tables come back
/// sorted by name and columns by ordinal position.
pub fn build_catalog<S: Session + ?Sized>(session: &mut S) -> Result<Catalog> {
    let databases: Vec<DatabaseRow> = session.execute(queries::SHOW_DATABASES)?.decode()?;

    let mut items = Vec::with_capacity(databases.len());
    for DatabaseRow { name: database } in databases {
        let schemas = schema_nodes(session, &database)?;
        items.push(CatalogNode::database(&database, schemas));
    }

    Ok(Catalog::new(items))
}

fn schema_nodes<S: Session + ?Sized>(session: &mut S, database: &str) -> Result<Vec<CatalogNode>> {
    let schemas: Vec<SchemaRow> = session.execute(&queries::list_schemas(database))?.decode()?;

    let mut nodes = Vec::with_capacity(schemas.len());
    for SchemaRow { name: schema } in schemas {
        let tables = table_nodes(session, database, &schema, TABLE_TYPE_LABEL)?;
        nodes.push(CatalogNode::schema(database, &schema, tables));
    }
    Ok(nodes)
}

// The reported table type is fetched but does not change the tag yet.
fn table_nodes<S: Session + ?Sized>(
    session: &mut S,
    database: &str,
    schema: &str,
    type_label: &str,
) -> Result<Vec<CatalogNode>> {
    let tables: Vec<TableRow> = session
        .execute(&queries::list_tables(database, schema))?
        .decode()?;

    let mut nodes = Vec::with_capacity(tables.len());
    for table in tables {
        let columns = column_nodes(session, database, schema, &table.name)?;
        nodes.push(CatalogNode::table(
            database,
            schema,
            &table.name,
            type_label,
            columns,
        ));
    }
    Ok(nodes)
}

fn column_nodes<S: Session + ?Sized>(
    session: &mut S,
    database: &str,
    schema: &str,
    table: &str,
) -> Result<Vec<CatalogNode>> {
    let columns: Vec<ColumnRow> = session
        .execute(&queries::list_columns(database, schema, table))?
        .decode()?;

    let table_path = format!("{}.{}.{}", database, schema, table);
    Ok(columns
        .iter()
        .map(|column| CatalogNode::column(&table_path, &column.name, shorten(&column.data_type)))
        .collect())
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
