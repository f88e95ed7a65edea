//! Hosted document store backed by Supabase's PostgREST endpoint.

use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{CatalogEntry, EntryDocument, EntryId};
use crate::store::{catalog_order, DocumentStore};
use crate::util::{supabase_error_message, supabase_service_url};

/// Collection (table) holding catalog entries.
pub const DEFAULT_COLLECTION: &str = "items";

#[derive(Clone)]
pub struct PostgrestDocumentStore {
    collection_url: String,
    anon_key: String,
    access_token: String,
    client: Client,
}

impl PostgrestDocumentStore {
    /// Build a store for `collection` on the project at `supabase_url`.
    ///
    /// Requests carry the signed-in user's access token; row-level policies on
    /// the server see the same identity the client filters by.
    pub fn new(
        supabase_url: &str,
        anon_key: impl Into<String>,
        access_token: impl Into<String>,
        collection: &str,
    ) -> Result<Self> {
        let rest_url = normalize_rest_url(supabase_url)?;
        let collection = collection.trim();
        if collection.is_empty() {
            return Err(Error::InvalidInput(
                "Collection name must not be empty".to_string(),
            ));
        }
        let anon_key = anon_key.into().trim().to_string();
        if anon_key.is_empty() {
            return Err(Error::InvalidInput(
                "Supabase anon key must not be empty".to_string(),
            ));
        }

        Ok(Self {
            collection_url: format!("{rest_url}/{collection}"),
            anon_key,
            access_token: access_token.into(),
            client: Client::builder().build()?,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authorized(request).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = supabase_error_message(status.as_u16(), &body);
            tracing::warn!("Store request to {} failed: {}", self.collection_url, message);
            return Err(Error::Remote(message));
        }
        Ok(response)
    }
}

impl DocumentStore for PostgrestDocumentStore {
    async fn query_by_owner(&self, owner_uid: &str) -> Result<Vec<CatalogEntry>> {
        tracing::debug!("Querying {} for owner {}", self.collection_url, owner_uid);
        let request = self.client.get(&self.collection_url).query(&[
            ("select", "*".to_string()),
            ("owner_uid", format!("eq.{owner_uid}")),
            ("order", "extra_field.asc,id.asc".to_string()),
        ]);
        let rows = self.send(request).await?.json::<Vec<EntryRow>>().await?;

        let mut entries = rows
            .into_iter()
            .map(EntryRow::into_entry)
            .collect::<Result<Vec<_>>>()?;
        // Server collation may be locale-aware; the catalog contract is byte order.
        entries.sort_by(catalog_order);
        Ok(entries)
    }

    async fn add(&self, document: &EntryDocument) -> Result<EntryId> {
        let request = self
            .client
            .post(&self.collection_url)
            .header("Prefer", "return=representation")
            .json(document);
        let rows = self.send(request).await?.json::<Vec<EntryRow>>().await?;
        let row = rows.into_iter().next().ok_or_else(|| {
            Error::Remote("Insert response did not include the new document".to_string())
        })?;
        let id = row.into_entry()?.id;
        tracing::debug!("Created document {}", id);
        Ok(id)
    }

    async fn replace(&self, id: &EntryId, document: &EntryDocument) -> Result<()> {
        let request = self
            .client
            .put(&self.collection_url)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&ReplaceBody { id, document });
        self.send(request).await?;
        Ok(())
    }

    async fn delete(&self, id: &EntryId) -> Result<()> {
        let request = self
            .client
            .delete(&self.collection_url)
            .query(&[("id", format!("eq.{id}"))]);
        self.send(request).await?;
        Ok(())
    }
}

/// Derive the REST base (`.../rest/v1`) from a Supabase project URL.
pub fn normalize_rest_url(url: &str) -> Result<String> {
    supabase_service_url(url, "/rest/v1").map_err(|message| Error::InvalidInput(message.to_string()))
}

// PUT replaces the whole row, so the primary key travels with the fields.
#[derive(Serialize)]
struct ReplaceBody<'a> {
    id: &'a EntryId,
    #[serde(flatten)]
    document: &'a EntryDocument,
}

#[derive(Debug, Deserialize)]
struct EntryRow {
    id: serde_json::Value,
    title: Option<String>,
    subtitle: Option<String>,
    description: Option<String>,
    url: Option<String>,
    image_ref: Option<String>,
    extra_field: Option<String>,
    owner_uid: Option<String>,
}

impl EntryRow {
    fn into_entry(self) -> Result<CatalogEntry> {
        let id = match self.id {
            serde_json::Value::String(value) => value,
            serde_json::Value::Number(value) => value.to_string(),
            other => {
                return Err(Error::Remote(format!(
                    "Document id has unexpected shape: {other}"
                )))
            }
        };

        Ok(CatalogEntry::new(
            EntryId::new(id),
            EntryDocument {
                title: self.title.unwrap_or_default(),
                subtitle: self.subtitle.unwrap_or_default(),
                description: self.description.unwrap_or_default(),
                url: self.url.unwrap_or_default(),
                image_ref: self.image_ref.unwrap_or_default(),
                extra_field: self.extra_field.unwrap_or_default(),
                owner_uid: self.owner_uid.unwrap_or_default(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_rest_url_appends_rest_path() {
        assert_eq!(
            normalize_rest_url("https://demo.supabase.co/").unwrap(),
            "https://demo.supabase.co/rest/v1"
        );
        assert_eq!(
            normalize_rest_url("https://demo.supabase.co/rest/v1").unwrap(),
            "https://demo.supabase.co/rest/v1"
        );
        assert!(normalize_rest_url("demo.supabase.co").is_err());
    }

    #[test]
    fn new_rejects_blank_collection() {
        let error = PostgrestDocumentStore::new("https://demo.supabase.co", "anon", "token", " ")
            .err()
            .unwrap();
        assert!(error.to_string().contains("Collection name"));
    }

    #[test]
    fn rows_with_nulls_become_empty_fields() {
        let row: EntryRow = serde_json::from_str(
            r#"{"id":42,"title":"Animal Farm","subtitle":"George Orwell","description":null,
                "url":null,"image_ref":"book9","extra_field":null,"owner_uid":"u1"}"#,
        )
        .unwrap();
        let entry = row.into_entry().unwrap();
        assert_eq!(entry.id.as_str(), "42");
        assert_eq!(entry.document.description, "");
        assert_eq!(entry.document.extra_field, "");
        assert_eq!(entry.document.image_ref, "book9");
    }

    #[test]
    fn replace_body_carries_id_and_every_field() {
        let id = EntryId::new("doc-1");
        let document = EntryDocument {
            title: "Meditations".to_string(),
            subtitle: "Marcus Aurelius".to_string(),
            owner_uid: "u1".to_string(),
            ..EntryDocument::default()
        };
        let value = serde_json::to_value(ReplaceBody {
            id: &id,
            document: &document,
        })
        .unwrap();
        assert_eq!(value["id"], "doc-1");
        assert_eq!(value["description"], "");
        assert_eq!(value["url"], "");
        assert_eq!(value.as_object().unwrap().len(), 8);
    }
}
