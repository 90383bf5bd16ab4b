//! HTTP client for the note server's `/files` API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use notevault_core::config::remote::RemoteConfig;
use notevault_core::error::{AppError, ErrorKind};
use notevault_core::result::AppResult;
use notevault_core::traits::remote::{ImageUpload, ListingNode, RemoteStore};
use notevault_core::types::NodeKind;

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Every payload-bearing response is wrapped as `{"result": ...}`.
#[derive(Debug, serde::Deserialize)]
struct Envelope<T> {
    result: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateContentBody<'a> {
    file_path: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FilePathsBody<'a> {
    file_paths: &'a [String],
}

/// Remote store backed by the note server.
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: Client,
    base_url: Url,
}

impl HttpRemoteStore {
    /// Build a client from configuration.
    pub fn new(config: &RemoteConfig) -> AppResult<Self> {
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid remote.base_url '{}'", config.base_url),
                e,
            )
        })?;

        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.api_key).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                "remote.api_key is not a valid header value",
                e,
            )
        })?;
        headers.insert(API_KEY_HEADER, api_key);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self { client, base_url })
    }

    /// Resolve `files/{segment}` against the base URL with query parameters.
    fn endpoint(&self, segment: &str, query: &[(&str, &str)]) -> AppResult<Url> {
        let mut url = self
            .base_url
            .join(&format!("files{segment}"))
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Invalid endpoint URL", e))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(method = %method, url = %url, "Remote request");
        self.client.request(method, url)
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(operation = operation, error = %e, "Remote call failed");
            AppError::with_source(ErrorKind::Remote, format!("{operation} request failed"), e)
        })?;
        response.error_for_status().map_err(|e| {
            warn!(operation = operation, status = ?e.status(), "Remote call rejected");
            AppError::with_source(ErrorKind::Remote, format!("{operation} rejected by server"), e)
        })
    }

    async fn send_for_result<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> AppResult<T> {
        let response = self.send(operation, request).await?;
        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Remote,
                format!("{operation} returned an unreadable body"),
                e,
            )
        })?;
        Ok(envelope.result)
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    fn store_type(&self) -> &str {
        "http"
    }

    async fn list(&self) -> AppResult<Vec<ListingNode>> {
        let url = self.endpoint("", &[])?;
        self.send_for_result("list", self.request(Method::GET, url)).await
    }

    async fn create(&self, path: &str, kind: NodeKind) -> AppResult<()> {
        let url = self.endpoint("/create", &[("path", path), ("type", kind.as_str())])?;
        self.send("create", self.request(Method::POST, url)).await?;
        Ok(())
    }

    async fn move_node(&self, path: &str, to: &str) -> AppResult<()> {
        let url = self.endpoint("/move", &[("path", path), ("to", to)])?;
        self.send("move", self.request(Method::PUT, url)).await?;
        Ok(())
    }

    async fn rename(&self, path: &str, new_name: &str) -> AppResult<()> {
        let url = self.endpoint("/rename", &[("path", path), ("newName", new_name)])?;
        self.send("rename", self.request(Method::PUT, url)).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let url = self.endpoint("/delete", &[("path", path)])?;
        self.send("delete", self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn read_content(&self, path: &str) -> AppResult<String> {
        let url = self.endpoint("/content", &[("path", path)])?;
        self.send_for_result("read_content", self.request(Method::GET, url))
            .await
    }

    async fn write_content(&self, path: &str, content: &str) -> AppResult<()> {
        let url = self.endpoint("/update", &[])?;
        let body = UpdateContentBody {
            file_path: path,
            content,
        };
        self.send("write_content", self.request(Method::PUT, url).json(&body))
            .await?;
        Ok(())
    }

    async fn publish(&self, paths: &[String]) -> AppResult<()> {
        let url = self.endpoint("/publish", &[])?;
        let body = FilePathsBody { file_paths: paths };
        self.send("publish", self.request(Method::POST, url).json(&body))
            .await?;
        Ok(())
    }

    async fn unpublish(&self, paths: &[String]) -> AppResult<()> {
        let url = self.endpoint("/unpublish", &[])?;
        let body = FilePathsBody { file_paths: paths };
        self.send("unpublish", self.request(Method::DELETE, url).json(&body))
            .await?;
        Ok(())
    }

    async fn upload_images(&self, images: Vec<ImageUpload>) -> AppResult<Vec<String>> {
        let url = self.endpoint("/images", &[])?;
        let mut form = Form::new();
        for image in images {
            let part = Part::bytes(image.data.to_vec())
                .file_name(image.file_name)
                .mime_str(&image.mime_type)
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Validation, "Invalid image MIME type", e)
                })?;
            form = form.part("files", part);
        }
        self.send_for_result("upload_images", self.request(Method::POST, url).multipart(form))
            .await
    }
}
