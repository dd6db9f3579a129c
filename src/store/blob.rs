use crate::config::Config;
use crate::store::{ContentStore, StoreError, StoredObject, WriteOptions};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

const TOKEN_VAR: &str = "BLOB_READ_WRITE_TOKEN";
const DOCUMENT_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// Page of the blob index
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    blobs: Vec<BlobEntry>,
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlobEntry {
    pathname: String,
    url: String,
    #[serde(default)]
    size: u64,
    #[serde(default)]
    uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    url: String,
}

/// Client for the hosted blob service.
pub struct BlobStore {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl BlobStore {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(
            client,
            config.blob_api_url.clone(),
            config.blob_read_write_token.clone(),
        )
    }

    fn token(&self) -> Result<&str, StoreError> {
        self.token
            .as_deref()
            .ok_or(StoreError::Configuration(TOKEN_VAR))
    }

    async fn list_page(&self, cursor: Option<&str>) -> Result<ListResponse, StoreError> {
        let token = self.token()?;

        let mut request = self.client.get(&self.api_url).bearer_auth(token);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to list blobs: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(StoreError::Unavailable(format!(
                "blob list failed ({}): {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Unavailable(format!("invalid blob list response: {}", e)))
    }

    /// Download an indexed blob from its public URL.
    async fn fetch(&self, object: &StoredObject) -> Result<String, StoreError> {
        let key = object.key.as_str();
        debug!(key = %key, url = %object.url, "Fetching blob content");

        let response = self
            .client
            .get(&object.url)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to fetch {}: {}", key, e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(key.to_string()));
        }
        if !response.status().is_success() {
            return Err(StoreError::Unavailable(format!(
                "fetching {} failed ({})",
                key,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to read {}: {}", key, e)))
    }
}

#[async_trait]
impl ContentStore for BlobStore {
    fn check_configured(&self) -> Result<(), StoreError> {
        self.token().map(|_| ())
    }

    async fn read(&self, key: &str) -> Result<String, StoreError> {
        // The index is the only lookup the service offers; match the
        // pathname exactly so `guide.mdx` never resolves to `guide.en.mdx`.
        let object = self
            .list()
            .await?
            .into_iter()
            .find(|object| object.key == key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

        self.fetch(&object).await
    }

    async fn write(
        &self,
        key: &str,
        content: &str,
        options: WriteOptions,
    ) -> Result<String, StoreError> {
        let token = self.token()?;

        let response = self
            .client
            .put(format!("{}/{}", self.api_url, key))
            .bearer_auth(token)
            .header("x-add-random-suffix", "0")
            .header(
                "x-allow-overwrite",
                if options.overwrite { "1" } else { "0" },
            )
            .header(
                "x-access",
                if options.public { "public" } else { "private" },
            )
            .header("x-content-type", DOCUMENT_CONTENT_TYPE)
            .body(content.to_string())
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("failed to upload {}: {}", key, e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::CONFLICT {
            return Err(StoreError::Conflict(key.to_string()));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(StoreError::Unavailable(format!(
                "upload of {} failed ({}): {}",
                key, status, body
            )));
        }

        let put: PutResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Unavailable(format!("invalid upload response: {}", e)))?;

        Ok(put.url)
    }

    async fn list(&self) -> Result<Vec<StoredObject>, StoreError> {
        let mut objects = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.list_page(cursor.as_deref()).await?;
            objects.extend(page.blobs.into_iter().map(|blob| StoredObject {
                key: blob.pathname,
                url: blob.url,
                size: blob.size,
                uploaded_at: blob.uploaded_at,
            }));

            match page.cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        debug!(count = objects.len(), "Listed blob store");
        Ok(objects)
    }

    async fn read_object(&self, object: &StoredObject) -> Result<String, StoreError> {
        self.fetch(object).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_string, header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn store(server: &MockServer) -> BlobStore {
        BlobStore::new(
            reqwest::Client::new(),
            format!("{}/", server.uri()),
            Some("vercel_blob_rw_test".to_string()),
        )
    }

    fn blob(server: &MockServer, pathname: &str) -> serde_json::Value {
        serde_json::json!({
            "pathname": pathname,
            "url": format!("{}/public/{}", server.uri(), pathname),
            "size": 42,
            "uploadedAt": "2024-05-20T10:00:00.000Z"
        })
    }

    async fn mount_index(server: &MockServer, pathnames: &[&str]) {
        let blobs: Vec<_> = pathnames.iter().map(|p| blob(server, p)).collect();
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("Authorization", "Bearer vercel_blob_rw_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "blobs": blobs,
                "hasMore": false
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_unconfigured_store_names_the_variable() {
        let store = BlobStore::new(reqwest::Client::new(), "http://localhost:1", None);

        assert_eq!(
            store.check_configured(),
            Err(StoreError::Configuration("BLOB_READ_WRITE_TOKEN"))
        );
        assert_eq!(
            store.read("guide.mdx").await,
            Err(StoreError::Configuration("BLOB_READ_WRITE_TOKEN"))
        );
    }

    #[tokio::test]
    async fn test_list_follows_cursor() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("cursor", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "blobs": [blob(&server, "second.mdx")],
                "hasMore": false
            })))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "blobs": [blob(&server, "first.mdx")],
                "cursor": "page-2",
                "hasMore": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let objects = store(&server).list().await.expect("should list");
        let keys: Vec<_> = objects.iter().map(|o| o.key.as_str()).collect();

        assert_eq!(keys, vec!["first.mdx", "second.mdx"]);
        assert_eq!(objects[0].size, 42);
        assert!(objects[0].uploaded_at.is_some());
    }

    #[tokio::test]
    async fn test_read_matches_key_exactly() {
        let server = MockServer::start().await;
        mount_index(&server, &["open-company.en.mdx", "open-company.mdx"]).await;

        Mock::given(method("GET"))
            .and(path("/public/open-company.mdx"))
            .respond_with(ResponseTemplate::new(200).set_body_string("---\n---\nCiao"))
            .mount(&server)
            .await;

        let content = store(&server)
            .read("open-company.mdx")
            .await
            .expect("should read");
        assert_eq!(content, "---\n---\nCiao");
    }

    #[tokio::test]
    async fn test_read_prefix_is_not_a_match() {
        let server = MockServer::start().await;
        mount_index(&server, &["open-company-2025.mdx"]).await;

        let result = store(&server).read("open-company.mdx").await;
        assert_eq!(
            result,
            Err(StoreError::NotFound("open-company.mdx".to_string()))
        );
    }

    #[tokio::test]
    async fn test_list_server_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let result = store(&server).list().await;
        assert!(matches!(result, Err(StoreError::Unavailable(msg)) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_write_sends_fixed_name_headers() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/open-company.en.mdx"))
            .and(header("Authorization", "Bearer vercel_blob_rw_test"))
            .and(header("x-add-random-suffix", "0"))
            .and(header("x-allow-overwrite", "1"))
            .and(header("x-access", "public"))
            .and(body_string("---\n---\nHello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "url": "https://blob.example.com/open-company.en.mdx",
                "pathname": "open-company.en.mdx"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let url = store(&server)
            .write("open-company.en.mdx", "---\n---\nHello", WriteOptions::PUBLISH)
            .await
            .expect("should write");

        assert_eq!(url, "https://blob.example.com/open-company.en.mdx");
    }

    #[tokio::test]
    async fn test_write_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let options = WriteOptions {
            public: true,
            overwrite: false,
        };
        let result = store(&server).write("guide.mdx", "x", options).await;
        assert_eq!(result, Err(StoreError::Conflict("guide.mdx".to_string())));
    }

    #[tokio::test]
    async fn test_read_object_skips_index() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/public/guida.mdx"))
            .respond_with(ResponseTemplate::new(200).set_body_string("---\n---\nTesto"))
            .expect(1)
            .mount(&server)
            .await;

        let object = StoredObject {
            key: "guida.mdx".to_string(),
            url: format!("{}/public/guida.mdx", server.uri()),
            size: 14,
            uploaded_at: None,
        };
        let content = store(&server).read_object(&object).await.unwrap();

        assert_eq!(content, "---\n---\nTesto");
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}
