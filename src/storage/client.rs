use std::path::Path;
use std::sync::{Arc, Mutex};

use log::info;
use lru_cache::LruCache;
use parking_lot::RwLock;
use rusqlite::{params, Connection, Result};

/// The only persisted state the bot owns: a per-guild command prefix.
///
/// The prefix is looked up on every inbound message, so reads go through a
/// small hot cache in front of the connection.
pub struct StorageClient {
    conn: Arc<Mutex<Connection>>,
    prefix_cache: Arc<RwLock<LruCache<u64, String>>>,
}

impl StorageClient {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(&path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS guild_prefixes (
                guild_id INTEGER PRIMARY KEY,
                prefix TEXT NOT NULL
            )",
            [],
        )?;

        info!("Database schema created or updated successfully");

        Ok(StorageClient {
            conn: Arc::new(Mutex::new(conn)),
            prefix_cache: Arc::new(RwLock::new(LruCache::new(1024))),
        })
    }

    pub fn guild_prefix(&self, guild_id: u64) -> Result<Option<String>, rusqlite::Error> {
        if let Some(prefix) = self.prefix_cache.write().get_mut(&guild_id).cloned() {
            return Ok(Some(prefix));
        }

        let query = "SELECT prefix FROM guild_prefixes WHERE guild_id = ?1";
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(query)?;
        let result = stmt.query_row([guild_id as i64], |row| row.get::<_, String>(0));
        match result {
            Ok(prefix) => {
                self.prefix_cache.write().insert(guild_id, prefix.clone());
                Ok(Some(prefix))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn set_guild_prefix(&self, guild_id: u64, prefix: &str) -> Result<(), rusqlite::Error> {
        let query = "INSERT OR REPLACE INTO guild_prefixes (guild_id, prefix) VALUES (?1, ?2)";
        {
            let conn = self.conn.lock().unwrap();
            let mut stmt = conn.prepare_cached(query)?;
            stmt.execute(params![guild_id as i64, prefix])?;
        }
        self.prefix_cache.write().insert(guild_id, prefix.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_defaults_to_none() {
        let storage = StorageClient::new(":memory:").unwrap();
        assert_eq!(storage.guild_prefix(1).unwrap(), None);
    }

    #[test]
    fn set_and_get_prefix() {
        let storage = StorageClient::new(":memory:").unwrap();
        storage.set_guild_prefix(42, "?").unwrap();
        assert_eq!(storage.guild_prefix(42).unwrap(), Some("?".to_string()));
    }

    #[test]
    fn set_overwrites_previous_prefix() {
        let storage = StorageClient::new(":memory:").unwrap();
        storage.set_guild_prefix(42, "?").unwrap();
        storage.set_guild_prefix(42, ">>").unwrap();
        assert_eq!(storage.guild_prefix(42).unwrap(), Some(">>".to_string()));
    }

    #[test]
    fn prefixes_are_per_guild() {
        let storage = StorageClient::new(":memory:").unwrap();
        storage.set_guild_prefix(1, "?").unwrap();
        storage.set_guild_prefix(2, "$").unwrap();
        assert_eq!(storage.guild_prefix(1).unwrap(), Some("?".to_string()));
        assert_eq!(storage.guild_prefix(2).unwrap(), Some("$".to_string()));
    }
}
