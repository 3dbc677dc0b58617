use super::{BlobStore, PersistenceResult, validate_key};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};

pub struct SqliteBlobStore {
    connection: Mutex<Connection>,
}

impl SqliteBlobStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        let connection = Connection::open_in_memory()?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS blobs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }
}

impl BlobStore for SqliteBlobStore {
    fn read_blob(&self, key: &str) -> PersistenceResult<Option<String>> {
        validate_key(key)?;
        let conn = self.connection.lock();
        let mut stmt = conn.prepare("SELECT value FROM blobs WHERE key = ?1")?;
        let value = stmt
            .query_row(params![key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn write_blob(&self, key: &str, value: &str) -> PersistenceResult<()> {
        validate_key(key)?;
        let conn = self.connection.lock();
        conn.execute(
            "INSERT INTO blobs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_blob(&self, key: &str) -> PersistenceResult<()> {
        validate_key(key)?;
        let conn = self.connection.lock();
        conn.execute("DELETE FROM blobs WHERE key = ?1", params![key])?;
        Ok(())
    }
}
