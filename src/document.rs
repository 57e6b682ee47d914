/// A row of the `documents` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub data: Vec<u8>,
}

impl Document {
    /// Map a `SELECT id, title, data` row
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            data: row.get(2)?,
        })
    }
}
