//! Local catalog store backed by libSQL

use crate::error::Result;
use crate::models::{CatalogEntry, EntryDocument, EntryId};
use crate::store::DocumentStore;
use libsql::Connection;

const SELECT_COLUMNS: &str =
    "id, title, subtitle, description, url, image_ref, extra_field, owner_uid";

/// libSQL implementation of `DocumentStore`
pub struct LibSqlEntryStore<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlEntryStore<'a> {
    /// Create a new store with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_entry(row: &libsql::Row) -> Result<CatalogEntry> {
        let id: String = row.get(0)?;
        Ok(CatalogEntry::new(
            EntryId::new(id),
            EntryDocument {
                title: row.get(1)?,
                subtitle: row.get(2)?,
                description: row.get(3)?,
                url: row.get(4)?,
                image_ref: row.get(5)?,
                extra_field: row.get(6)?,
                owner_uid: row.get(7)?,
            },
        ))
    }

    async fn write(&self, id: &EntryId, document: &EntryDocument) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO items
                    (id, title, subtitle, description, url, image_ref, extra_field, owner_uid)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                [
                    id.as_str(),
                    document.title.as_str(),
                    document.subtitle.as_str(),
                    document.description.as_str(),
                    document.url.as_str(),
                    document.image_ref.as_str(),
                    document.extra_field.as_str(),
                    document.owner_uid.as_str(),
                ],
            )
            .await?;
        Ok(())
    }
}

impl DocumentStore for LibSqlEntryStore<'_> {
    async fn query_by_owner(&self, owner_uid: &str) -> Result<Vec<CatalogEntry>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM items
             WHERE owner_uid = ?
             ORDER BY extra_field COLLATE BINARY ASC, id ASC"
        );
        let mut rows = self.conn.query(&sql, [owner_uid]).await?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(Self::parse_entry(&row)?);
        }
        Ok(entries)
    }

    async fn add(&self, document: &EntryDocument) -> Result<EntryId> {
        let id = EntryId::new(uuid::Uuid::now_v7().to_string());
        self.write(&id, document).await?;
        tracing::debug!("Inserted local entry {}", id);
        Ok(id)
    }

    async fn replace(&self, id: &EntryId, document: &EntryDocument) -> Result<()> {
        self.write(id, document).await
    }

    async fn delete(&self, id: &EntryId) -> Result<()> {
        self.conn
            .execute("DELETE FROM items WHERE id = ?", [id.as_str()])
            .await?;
        Ok(())
    }
}
