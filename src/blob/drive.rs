use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::{BlobError, BlobRef, BlobStore};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const BOUNDARY: &str = "talent_map_upload_boundary";

#[derive(Debug, Serialize)]
struct FileMetadata<'a> {
    name: &'a str,
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    parents: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFile {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    web_view_link: Option<String>,
}

/// Uploads documents through the drive v3 multipart upload endpoint.
#[derive(Debug, Clone)]
pub struct DriveBlobStore {
    http: Client,
    api_base: Url,
    token: String,
}

impl DriveBlobStore {
    pub fn new(api_base: &str, token: String) -> Result<Self, BlobError> {
        let api_base = Url::parse(api_base).map_err(|e| {
            BlobError::Configuration(format!("invalid blob.api_base '{api_base}': {e}"))
        })?;
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_base,
            token,
        })
    }

    fn upload_url(&self) -> Result<Url, BlobError> {
        self.api_base
            .join("upload/drive/v3/files")
            .map_err(|e| BlobError::Configuration(e.to_string()))
    }
}

/// Builds a `multipart/related` body: JSON metadata part, then the media part.
fn related_body(metadata: &[u8], content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(metadata.len() + bytes.len() + 256);
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

#[async_trait]
impl BlobStore for DriveBlobStore {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        suggested_name: &str,
        content_type: &str,
        parent_folder: Option<String>,
    ) -> Result<BlobRef, BlobError> {
        let metadata = serde_json::to_vec(&FileMetadata {
            name: suggested_name,
            mime_type: content_type,
            parents: parent_folder.into_iter().collect(),
        })
        .map_err(|e| BlobError::InvalidResponse(e.to_string()))?;

        debug!(name = suggested_name, bytes = bytes.len(), "Uploading document");
        let uploaded: UploadedFile = self
            .http
            .post(self.upload_url()?)
            .bearer_auth(&self.token)
            .query(&[
                ("uploadType", "multipart"),
                ("fields", "id,webViewLink,name"),
                ("supportsAllDrives", "true"),
            ])
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={BOUNDARY}"),
            )
            .body(related_body(&metadata, content_type, &bytes))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let url = uploaded
            .web_view_link
            .unwrap_or_else(|| format!("https://drive.google.com/file/d/{}/view", uploaded.id));
        let name = uploaded.name.unwrap_or_else(|| suggested_name.to_string());
        info!(file_id = %uploaded.id, %name, "Document uploaded");
        Ok(BlobRef { url, name })
    }
}
