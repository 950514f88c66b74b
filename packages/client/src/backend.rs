// ABOUTME: Persistence seam between the store and the REST API
// ABOUTME: Object-safe and JSON-valued so tests can record calls without HTTP

use async_trait::async_trait;
use dayboard_core::{ConversionOverrides, Resource};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Remote persistence used by [`crate::Store`]
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// `GET /api/<collection>`
    async fn list(&self, collection: &str) -> ClientResult<Vec<Value>>;

    /// `POST /api/<collection>`, create or replace by id
    async fn save(&self, collection: &str, body: Value) -> ClientResult<Value>;

    /// `DELETE /api/<collection>/<id>`
    async fn delete(&self, collection: &str, id: &str) -> ClientResult<()>;

    /// `POST /api/ideas/<id>/convert-to-project`, returns the project
    async fn convert_idea(
        &self,
        idea_id: &str,
        overrides: &ConversionOverrides,
    ) -> ClientResult<Value>;

    /// `GET /api/settings/<key>`, `null` when unset
    async fn get_setting(&self, key: &str) -> ClientResult<Value>;

    /// `POST /api/settings/<key>`
    async fn put_setting(&self, key: &str, value: Value) -> ClientResult<()>;
}

/// Load a whole collection as typed records
pub async fn fetch_all<R: Resource, B: Backend + ?Sized>(backend: &B) -> ClientResult<Vec<R>> {
    backend
        .list(R::COLLECTION)
        .await?
        .into_iter()
        .map(|value| serde_json::from_value::<R>(value).map_err(ClientError::from))
        .collect()
}

/// Upsert one record and return the server's copy
pub async fn persist<R: Resource, B: Backend + ?Sized>(backend: &B, item: &R) -> ClientResult<R> {
    let body = serde_json::to_value(item)?;
    let saved = backend.save(R::COLLECTION, body).await?;
    Ok(serde_json::from_value(saved)?)
}
