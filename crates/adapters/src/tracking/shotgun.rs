// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ShotGrid REST API client.
//!
//! Authenticates as an API script with the client-credentials grant, searches
//! with array-style filters, and flattens the JSON:API response shape
//! (`attributes` plus `relationships.*.data`) into the flat field maps the
//! core records deserialize from.

use super::{TrackingError, TrackingStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use sgf_core::{
    kind, EntityRef, EventRecord, PendingPublish, TrackedFile, VersionDraft, DEPENDENCY_FIELDS,
    EVENT_FIELDS,
};
use std::path::Path;
use std::time::{Duration, Instant};

/// Content type for searches whose filters use the array syntax.
const ARRAY_FILTERS: &str = "application/vnd+shotgun.api3_array+json";

/// Refresh tokens this long before the server would reject them.
const TOKEN_SLACK: Duration = Duration::from_secs(30);

/// Records per search page; the server caps this at 500.
const PAGE_SIZE: usize = 500;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expiry")]
    expires_in: u64,
}

fn default_expiry() -> u64 {
    600
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct UploadTicket {
    data: Value,
    links: UploadLinks,
}

#[derive(Debug, Deserialize)]
struct UploadLinks {
    upload: String,
    complete_upload: String,
}

/// Tracking store backed by a ShotGrid site
pub struct ShotgunClient {
    http: reqwest::Client,
    server: String,
    script_name: String,
    script_key: String,
    page_size: usize,
    token: Mutex<Option<AccessToken>>,
}

impl ShotgunClient {
    pub fn new(server: impl Into<String>, script_name: impl Into<String>, script_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            server: server.into().trim_end_matches('/').to_string(),
            script_name: script_name.into(),
            script_key: script_key.into(),
            page_size: PAGE_SIZE,
            token: Mutex::new(None),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, PAGE_SIZE);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.server, path)
    }

    /// Absolute URL for a link the server returned, which may be site-relative.
    fn resolve_link(&self, link: &str) -> String {
        if link.starts_with("http://") || link.starts_with("https://") {
            link.to_string()
        } else {
            format!("{}{}", self.server, link)
        }
    }

    async fn access_token(&self) -> Result<String, TrackingError> {
        if let Some(token) = self.token.lock().as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.value.clone());
            }
        }

        tracing::debug!(server = %self.server, "requesting access token");
        let response = self
            .http
            .post(self.url("/auth/access_token"))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.script_name.as_str()),
                ("client_secret", self.script_key.as_str()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TrackingError::Auth(format!("HTTP {}: {}", status.as_u16(), body)));
        }
        let token: TokenResponse = response.json().await?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_SLACK);
        *self.token.lock() =
            Some(AccessToken { value: token.access_token.clone(), expires_at: Instant::now() + lifetime });
        Ok(token.access_token)
    }

    /// Every record matching `filters`, requesting pages until one comes
    /// back short.
    async fn search(
        &self,
        entity_type: &str,
        filters: Value,
        fields: &[&str],
    ) -> Result<Vec<Map<String, Value>>, TrackingError> {
        let operation = format!("search {entity_type}");
        let url = self.url(&format!("/entity/{}/_search", endpoint_name(entity_type)));
        let body = json!({ "filters": filters }).to_string();
        let fields = fields.join(",");
        let page_size = self.page_size.to_string();

        let mut found = Vec::new();
        for page in 1.. {
            let token = self.access_token().await?;
            let page_number = page.to_string();
            let response = self
                .http
                .post(&url)
                .bearer_auth(token)
                .header(reqwest::header::CONTENT_TYPE, ARRAY_FILTERS)
                .query(&[
                    ("fields", fields.as_str()),
                    ("page[size]", page_size.as_str()),
                    ("page[number]", page_number.as_str()),
                ])
                .body(body.clone())
                .send()
                .await?;
            let response = checked_json(response, &operation).await?;

            let Some(Value::Array(records)) = response.get("data") else {
                return Err(TrackingError::Response { operation, message: "missing data array".into() });
            };
            for record in records {
                found.push(flatten_record(record, &operation)?);
            }
            if records.len() < self.page_size {
                break;
            }
            tracing::debug!(entity_type, page, count = found.len(), "fetching next page");
        }
        Ok(found)
    }

    async fn create(&self, entity_type: &str, data: Value) -> Result<EntityRef, TrackingError> {
        let operation = format!("create {entity_type}");
        let token = self.access_token().await?;
        let response = self
            .http
            .post(self.url(&format!("/entity/{}", endpoint_name(entity_type))))
            .bearer_auth(token)
            .json(&data)
            .send()
            .await?;
        let body = checked_json(response, &operation).await?;

        let record = body.get("data").ok_or_else(|| TrackingError::Response {
            operation: operation.clone(),
            message: "missing data object".into(),
        })?;
        let fields = flatten_record(record, &operation)?;
        let id = fields.get("id").and_then(Value::as_i64).ok_or_else(|| TrackingError::Response {
            operation,
            message: "created record has no id".into(),
        })?;
        Ok(EntityRef::new(entity_type, id))
    }
}

#[async_trait]
impl TrackingStore for ShotgunClient {
    async fn find_event(&self, id: i64) -> Result<Option<EventRecord>, TrackingError> {
        let records = self.search(kind::EVENT_LOG_ENTRY, json!([["id", "is", id]]), EVENT_FIELDS).await?;
        records.into_iter().next().map(EventRecord::from_fields).transpose().map_err(Into::into)
    }

    async fn find_tracked_file(
        &self,
        entity: &EntityRef,
        fields: &[&str],
    ) -> Result<Option<TrackedFile>, TrackingError> {
        let records = self.search(&entity.entity_type, json!([["id", "is", entity.id]]), fields).await?;
        records.into_iter().next().map(TrackedFile::from_fields).transpose().map_err(Into::into)
    }

    async fn find_tracked_files(&self, ids: &[i64]) -> Result<Vec<TrackedFile>, TrackingError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let records = self.search(kind::PUBLISHED_FILE, json!([["id", "in", ids]]), DEPENDENCY_FIELDS).await?;
        records.into_iter().map(|r| TrackedFile::from_fields(r).map_err(Into::into)).collect()
    }

    async fn find_published_file_type(&self, code: &str) -> Result<Option<EntityRef>, TrackingError> {
        let records = self.search(kind::PUBLISHED_FILE_TYPE, json!([["code", "is", code]]), &["id", "code"]).await?;
        Ok(records.into_iter().next().and_then(|r| {
            let id = r.get("id").and_then(Value::as_i64)?;
            Some(EntityRef::new(kind::PUBLISHED_FILE_TYPE, id).with_name(code))
        }))
    }

    async fn create_published_file(&self, publish: &PendingPublish) -> Result<EntityRef, TrackingError> {
        let data = serde_json::to_value(publish).map_err(|e| TrackingError::Response {
            operation: "encode published file".into(),
            message: e.to_string(),
        })?;
        self.create(kind::PUBLISHED_FILE, data).await
    }

    async fn create_version(&self, draft: &VersionDraft) -> Result<EntityRef, TrackingError> {
        let data = serde_json::to_value(draft).map_err(|e| TrackingError::Response {
            operation: "encode version".into(),
            message: e.to_string(),
        })?;
        self.create(kind::VERSION, data).await
    }

    async fn upload(&self, entity: &EntityRef, path: &Path, field: &str) -> Result<(), TrackingError> {
        let operation = format!("upload {field} to {entity}");
        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or_default().to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| TrackingError::Io { path: path.to_path_buf(), source })?;
        tracing::info!(%entity, field, path = %path.display(), size = bytes.len(), "uploading attachment");

        let token = self.access_token().await?;
        let response = self
            .http
            .get(self.url(&format!(
                "/entity/{}/{}/{}/_upload",
                endpoint_name(&entity.entity_type),
                entity.id,
                field
            )))
            .bearer_auth(&token)
            .query(&[("filename", filename.as_str())])
            .send()
            .await?;
        let ticket: UploadTicket = serde_json::from_value(checked_json(response, &operation).await?)
            .map_err(|e| TrackingError::Response { operation: operation.clone(), message: e.to_string() })?;

        // Site-hosted uploads need the token; presigned storage URLs reject it
        let upload_url = self.resolve_link(&ticket.links.upload);
        let mut put = self.http.put(&upload_url).body(bytes);
        if upload_url.starts_with(&self.server) {
            put = put.bearer_auth(&token);
        }
        let response = put.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TrackingError::Status { operation, status, body });
        }

        let response = self
            .http
            .post(self.resolve_link(&ticket.links.complete_upload))
            .bearer_auth(&token)
            .json(&json!({ "upload_info": ticket.data, "upload_data": { "display_name": filename } }))
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TrackingError::Status { operation, status, body });
        }
        Ok(())
    }
}

async fn checked_json(response: reqwest::Response, operation: &str) -> Result<Value, TrackingError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TrackingError::Status { operation: operation.to_string(), status: status.as_u16(), body });
    }
    Ok(response.json().await?)
}

/// REST collection name for an entity type: `PublishedFile` → `published_files`.
pub(crate) fn endpoint_name(entity_type: &str) -> String {
    let mut snake = String::with_capacity(entity_type.len() + 4);
    for (i, ch) in entity_type.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                snake.push('_');
            }
            snake.push(ch.to_ascii_lowercase());
        } else {
            snake.push(ch);
        }
    }
    match snake.strip_suffix('y') {
        Some(stem) if !stem.ends_with(|c: char| "aeiou".contains(c)) => format!("{stem}ies"),
        _ => format!("{snake}s"),
    }
}

/// Merge a JSON:API record into one flat field map.
pub(crate) fn flatten_record(record: &Value, operation: &str) -> Result<Map<String, Value>, TrackingError> {
    let malformed = |message: &str| TrackingError::Response {
        operation: operation.to_string(),
        message: message.to_string(),
    };
    let Value::Object(record) = record else {
        return Err(malformed("record is not an object"));
    };

    let mut fields = Map::new();
    if let Some(id) = record.get("id") {
        fields.insert("id".into(), id.clone());
    }
    if let Some(entity_type) = record.get("type") {
        fields.insert("type".into(), entity_type.clone());
    }
    if let Some(Value::Object(attributes)) = record.get("attributes") {
        fields.extend(attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    if let Some(Value::Object(relationships)) = record.get("relationships") {
        for (name, relation) in relationships {
            fields.insert(name.clone(), relation.get("data").cloned().unwrap_or(Value::Null));
        }
    }
    Ok(fields)
}

#[cfg(test)]
#[path = "shotgun_tests/mod.rs"]
mod tests;
