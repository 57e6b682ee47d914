use blob_store::sqlite::{ColumnInfo, DataType, TableDefinition, ColumnDefinition};
use blob_store::{BlobStoreError, Document, ResetPolicy, Result, Schema, SqliteStore};
use tempfile::NamedTempFile;

// Helper function to create an in-memory store with the documents table
fn create_test_store() -> Result<SqliteStore> {
    let store = SqliteStore::open_in_memory()?;
    store.initialize_schema(&Schema::documents(), ResetPolicy::DropAndRecreate)?;
    Ok(store)
}

fn column(name: &str, declared_type: &str, not_null: bool, primary_key: bool) -> ColumnInfo {
    ColumnInfo {
        name: name.to_string(),
        declared_type: declared_type.to_string(),
        not_null,
        primary_key,
    }
}

#[test]
fn test_documents_ddl() {
    let schema = Schema::documents();
    assert_eq!(schema.tables.len(), 1);
    assert_eq!(
        schema.tables[0].create_sql(),
        "CREATE TABLE IF NOT EXISTS documents (id INTEGER PRIMARY KEY, title VARCHAR(255) NOT NULL, data BLOB NOT NULL)"
    );
    assert_eq!(schema.tables[0].drop_sql(), "DROP TABLE IF EXISTS documents");
}

#[test]
fn test_custom_table_ddl() {
    let table = TableDefinition::new("notes")
        .add_column(ColumnDefinition::new("body", DataType::Varchar(32)));
    assert_eq!(
        table.create_sql(),
        "CREATE TABLE IF NOT EXISTS notes (body VARCHAR(32))"
    );
}

#[test]
fn test_schema_columns() {
    test_schema_columns_impl().unwrap();
}

fn test_schema_columns_impl() -> Result<()> {
    let store = create_test_store()?;
    let columns = store.table_columns("documents")?;
    assert_eq!(
        columns,
        vec![
            column("id", "INTEGER", false, true),
            column("title", "VARCHAR(255)", true, false),
            column("data", "BLOB", true, false),
        ]
    );
    Ok(())
}

#[test]
fn test_basic_operations() {
    test_basic_operations_impl().unwrap();
}

fn test_basic_operations_impl() -> Result<()> {
    let store = create_test_store()?;

    let id = store.insert_document("JPG Image", &[0xFF, 0xD8, 0xFF])?;
    assert_eq!(id, 1);

    let second = store.insert_document("Empty", &[])?;
    assert_eq!(second, 2);

    assert_eq!(store.fetch_data(1)?, vec![0xFF, 0xD8, 0xFF]);
    assert_eq!(store.fetch_data(2)?, Vec::<u8>::new());
    assert_eq!(
        store.get_document(1)?,
        Some(Document {
            id: 1,
            title: "JPG Image".to_string(),
            data: vec![0xFF, 0xD8, 0xFF],
        })
    );
    assert_eq!(store.get_document(3)?, None);
    assert_eq!(store.count_documents()?, 2);
    Ok(())
}

#[test]
fn test_fetch_missing_document() {
    let store = create_test_store().unwrap();
    let err = store.fetch_data(1).unwrap_err();
    assert!(matches!(err, BlobStoreError::DocumentNotFound(1)));
}

#[test]
fn test_reset_policies() {
    test_reset_policies_impl().unwrap();
}

fn test_reset_policies_impl() -> Result<()> {
    let temp_file = NamedTempFile::new().unwrap();
    let schema = Schema::documents();

    let store = SqliteStore::open(temp_file.path())?;
    store.initialize_schema(&schema, ResetPolicy::CreateIfAbsent)?;
    store.insert_document("first", b"one")?;
    store.close()?;

    // Reopening without a reset keeps the row
    let store = SqliteStore::open(temp_file.path())?;
    store.initialize_schema(&schema, ResetPolicy::CreateIfAbsent)?;
    assert_eq!(store.count_documents()?, 1);

    store.initialize_schema(&schema, ResetPolicy::DropAndRecreate)?;
    assert_eq!(store.count_documents()?, 0);
    assert_eq!(store.insert_document("again", b"two")?, 1);
    Ok(())
}

#[test]
fn test_transaction_rolls_back_on_drop() {
    test_transaction_rolls_back_on_drop_impl().unwrap();
}

fn test_transaction_rolls_back_on_drop_impl() -> Result<()> {
    let mut store = create_test_store()?;
    {
        let tx = store.transaction()?;
        assert_eq!(tx.insert_document("pending", b"abc")?, 1);
        assert_eq!(tx.fetch_data(1)?, b"abc".to_vec());
    }
    assert_eq!(store.count_documents()?, 0);

    let tx = store.transaction()?;
    tx.insert_document("kept", b"abc")?;
    tx.commit()?;
    assert_eq!(store.count_documents()?, 1);
    Ok(())
}

#[test]
fn test_not_null_constraints() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute(&Schema::documents().tables[0].create_sql(), [])
        .unwrap();

    let no_data = conn.execute(
        "INSERT INTO documents (title, data) VALUES (?1, NULL)",
        ["no data"],
    );
    assert!(no_data.is_err());

    let no_title = conn.execute(
        "INSERT INTO documents (title, data) VALUES (NULL, ?1)",
        [b"bytes".to_vec()],
    );
    assert!(no_title.is_err());
}
