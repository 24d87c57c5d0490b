//! TTL-bounded key→text store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use rusqlite::{Connection, OptionalExtension};

use super::connection::open_db;

/// Default entry time-to-live: 336 hours (14 days), the cache horizon of
/// the surrounding media-center system.
pub const DEFAULT_TTL_HOURS: i64 = 336;

/// Key→text store with a fixed time-to-live assigned at write time.
///
/// Keys are arbitrary strings (request URLs in practice). Entries past
/// their expiry read as absent and are removed on read. Each operation is
/// a single independent statement; there is no cross-call transaction.
#[derive(Debug)]
pub struct LookupCache {
    conn: Connection,
    ttl: Duration,
}

impl LookupCache {
    /// Opens a cache with the default TTL.
    ///
    /// See [`open_db`] for path resolution.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(dir: Option<&PathBuf>) -> Result<Self> {
        Self::with_ttl(dir, DEFAULT_TTL_HOURS)
    }

    /// Opens a cache whose entries live for `ttl_hours` from write time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated, or
    /// if `ttl_hours` is out of range for a duration.
    pub fn with_ttl(dir: Option<&PathBuf>, ttl_hours: i64) -> Result<Self> {
        let conn = open_db(dir)?;
        let ttl = Duration::try_hours(ttl_hours)
            .with_context(|| format!("ttl of {ttl_hours} hours is out of range"))?;
        Ok(Self { conn, ttl })
    }

    /// Returns the stored text for `key` if present and unexpired.
    ///
    /// Expired rows read as absent and are removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database read or eviction fails.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let row: Option<(String, i64)> = self
            .conn
            .query_row(
                "SELECT value, expires_at FROM lookup_cache WHERE key = ?1",
                [key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .with_context(|| format!("failed to read cache entry for {key}"))?;

        let Some((value, expires_at)) = row else {
            return Ok(None);
        };

        if expires_at <= Utc::now().timestamp() {
            tracing::debug!(%key, "evicting expired cache entry");
            self.delete(key)?;
            return Ok(None);
        }

        Ok(Some(value))
    }

    /// Upserts `value` under `key`, expiring at `now + ttl`.
    ///
    /// # Errors
    ///
    /// Returns an error if the expiry timestamp is unrepresentable or the
    /// database write fails.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let expires_at = Utc::now()
            .checked_add_signed(self.ttl)
            .context("cache expiry is out of representable time")?
            .timestamp();

        self.conn
            .execute(
                "INSERT INTO lookup_cache (key, value, expires_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     expires_at = excluded.expires_at",
                rusqlite::params![key, value, expires_at],
            )
            .with_context(|| format!("failed to write cache entry for {key}"))?;
        Ok(())
    }

    /// Removes the entry for `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM lookup_cache WHERE key = ?1", [key])
            .with_context(|| format!("failed to delete cache entry for {key}"))?;
        Ok(())
    }
}
