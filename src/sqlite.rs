use rusqlite::{params, Connection, OptionalExtension, Transaction};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::document::Document;
use crate::error::{BlobStoreError, Result};

pub const DOCUMENTS_TABLE: &str = "documents";

/// Schema definition for the SQLite database
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub tables: Vec<TableDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    pub fn add_table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    /// The single `documents` table
    pub fn documents() -> Self {
        Self::new().add_table(
            TableDefinition::new(DOCUMENTS_TABLE)
                .add_column(ColumnDefinition::new("id", DataType::Integer).primary_key())
                .add_column(ColumnDefinition::new("title", DataType::Varchar(255)).not_null())
                .add_column(ColumnDefinition::new("data", DataType::Blob).not_null()),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn add_column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    pub fn create_sql(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(ColumnDefinition::to_sql).collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.name,
            columns.join(", ")
        )
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            constraints: Vec::new(),
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.constraints.push(ColumnConstraint::PrimaryKey);
        self
    }

    pub fn not_null(mut self) -> Self {
        self.constraints.push(ColumnConstraint::NotNull);
        self
    }

    fn to_sql(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.data_type.to_sql());
        for constraint in &self.constraints {
            sql.push(' ');
            sql.push_str(constraint.to_sql());
        }
        sql
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Varchar(u32),
    Blob,
}

impl DataType {
    pub fn to_sql(&self) -> String {
        match self {
            DataType::Integer => "INTEGER".to_string(),
            DataType::Varchar(len) => format!("VARCHAR({len})"),
            DataType::Blob => "BLOB".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnConstraint {
    PrimaryKey,
    NotNull,
}

impl ColumnConstraint {
    pub fn to_sql(&self) -> &'static str {
        match self {
            ColumnConstraint::PrimaryKey => "PRIMARY KEY",
            ColumnConstraint::NotNull => "NOT NULL",
        }
    }
}

/// What happens to an existing table when the schema is initialized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Drop the table first; every run starts from an empty table
    #[default]
    DropAndRecreate,
    /// Keep the table and its rows if it already exists
    CreateIfAbsent,
}

/// A column as reported by `pragma_table_info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

/// Owns the SQLite connection. Dropping the store closes the connection.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database file, creating it if absent
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        info!("opened sqlite store at {}", path.display());
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn initialize_schema(&self, schema: &Schema, policy: ResetPolicy) -> Result<()> {
        for table in &schema.tables {
            if policy == ResetPolicy::DropAndRecreate {
                let sql = table.drop_sql();
                debug!("{sql}");
                self.conn.execute(&sql, [])?;
            }
            let sql = table.create_sql();
            debug!("{sql}");
            self.conn.execute(&sql, [])?;
        }
        Ok(())
    }

    /// Start a transaction; it rolls back unless committed
    pub fn transaction(&mut self) -> Result<StoreTransaction<'_>> {
        Ok(StoreTransaction {
            tx: self.conn.transaction()?,
        })
    }

    pub fn insert_document(&self, title: &str, data: &[u8]) -> Result<i64> {
        insert_document(&self.conn, title, data)
    }

    pub fn fetch_data(&self, id: i64) -> Result<Vec<u8>> {
        fetch_data(&self.conn, id)
    }

    pub fn get_document(&self, id: i64) -> Result<Option<Document>> {
        let document = self
            .conn
            .query_row(
                "SELECT id, title, data FROM documents WHERE id = ?1",
                [id],
                Document::from_row,
            )
            .optional()?;
        Ok(document)
    }

    pub fn count_documents(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT name, type, "notnull", pk FROM pragma_table_info(?1) ORDER BY cid"#,
        )?;
        let rows = stmt.query_map([table], |row| {
            Ok(ColumnInfo {
                name: row.get(0)?,
                declared_type: row.get(1)?,
                not_null: row.get::<_, i64>(2)? != 0,
                primary_key: row.get::<_, i64>(3)? != 0,
            })
        })?;
        let mut columns = Vec::new();
        for column in rows {
            columns.push(column?);
        }
        Ok(columns)
    }

    /// Close the connection, reporting any error SQLite raises on close
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| err)?;
        Ok(())
    }
}

/// Insert and fetch within one transaction
pub struct StoreTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl StoreTransaction<'_> {
    pub fn insert_document(&self, title: &str, data: &[u8]) -> Result<i64> {
        insert_document(&self.tx, title, data)
    }

    pub fn fetch_data(&self, id: i64) -> Result<Vec<u8>> {
        fetch_data(&self.tx, id)
    }

    pub fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }
}

fn insert_document(conn: &Connection, title: &str, data: &[u8]) -> Result<i64> {
    conn.execute(
        "INSERT INTO documents (title, data) VALUES (?1, ?2)",
        params![title, data],
    )?;
    let id = conn.last_insert_rowid();
    info!(id, title, bytes = data.len(), "inserted document");
    Ok(id)
}

fn fetch_data(conn: &Connection, id: i64) -> Result<Vec<u8>> {
    conn.query_row("SELECT data FROM documents WHERE id = ?1", [id], |row| {
        row.get(0)
    })
    .optional()?
    .ok_or(BlobStoreError::DocumentNotFound(id))
}
