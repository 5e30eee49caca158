//! Upload orchestration
//!
//! Computes public IDs, sends signed multipart requests to the upload API,
//! records successful uploads and applies local file retention.

use crate::models::{DestroyResponse, ResourceType, UploadResult};
use crate::naming::normalize;
use crate::retention;
use crate::service::Service;
use crate::tracking::UploadRecord;
use crate::{Error, Result};
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use sha1::{Digest, Sha1};
use std::path::Path;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

impl Service {
    /// Upload `content` as an image and return the public ID the service
    /// stored it under.
    ///
    /// With a non-empty `base_path` the public ID is derived from `name`
    /// through [`normalize`]; otherwise `name` is used as-is.
    pub async fn upload_image(&self, name: &str, content: &[u8], base_path: &str) -> Result<String> {
        let public_id = if base_path.trim().is_empty() {
            name.to_string()
        } else {
            normalize(name, base_path, "")
        };

        let result = self
            .upload(&public_id, name, content, ResourceType::Image)
            .await?;
        Ok(result.public_id)
    }

    /// Upload a local file, then delete it unless it matches the keep
    /// pattern. Simulated uploads leave the file alone.
    pub async fn upload_file(&self, path: &Path, base_path: &str, prepend: &str) -> Result<UploadResult> {
        let content = tokio::fs::read(path).await?;
        let source = path.to_string_lossy();
        let public_id = normalize(&source, base_path, prepend);

        let result = self
            .upload(&public_id, &source, &content, ResourceType::from_path(path))
            .await?;

        if !self.simulate {
            retention::apply(self.keep_files.as_ref(), path).await;
        }

        Ok(result)
    }

    /// Upload every regular file under `dir`, in file name order, with
    /// `dir` as the base path. Stops at the first failure.
    pub async fn upload_dir(&self, dir: &Path, prepend: &str) -> Result<Vec<UploadResult>> {
        let base_path = dir.to_string_lossy();
        let mut results = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            results.push(self.upload_file(entry.path(), &base_path, prepend).await?);
        }

        info!("Uploaded {} file(s) from {}", results.len(), dir.display());
        Ok(results)
    }

    /// Delete an uploaded asset.
    pub async fn delete(&self, public_id: &str, resource_type: ResourceType) -> Result<()> {
        if self.simulate {
            self.report(format_args!("Simulated delete of {}", public_id));
            return Ok(());
        }

        let endpoint = self.endpoint(resource_type, "destroy")?;
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.api_secret,
        );
        let params = [
            ("public_id", public_id),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        debug!("Sending delete request for {} to {}", public_id, endpoint);
        let response = self
            .client
            .post(endpoint.clone())
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send delete request to {}: {}", endpoint, e);
                Error::DeleteFailed(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::DeleteFailed(e.to_string()))?;
        if !status.is_success() {
            error!("Delete API error (status {}): {}", status, body);
            return Err(Error::DeleteFailed(format!("status {}: {}", status, body)));
        }

        let destroyed: DestroyResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse delete response: {}\nBody: {}", e, body);
            Error::MalformedResponse(e.to_string())
        })?;
        if destroyed.result != "ok" {
            return Err(Error::DeleteFailed(format!(
                "{}: {}",
                public_id, destroyed.result
            )));
        }

        self.report(format_args!("Deleted {}", public_id));
        Ok(())
    }

    async fn upload(
        &self,
        public_id: &str,
        source: &str,
        content: &[u8],
        resource_type: ResourceType,
    ) -> Result<UploadResult> {
        if self.simulate {
            self.report(format_args!("Simulated upload of {} as {}", source, public_id));
            return Ok(UploadResult {
                public_id: public_id.to_string(),
                version: 0,
                format: extension(source),
                resource_type,
            });
        }

        let endpoint = self.upload_uri_for(resource_type)?;
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.api_secret,
        );
        let file_name = Path::new(source)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| public_id.to_string());

        let form = Form::new()
            .text("public_id", public_id.to_string())
            .text("timestamp", timestamp)
            .text("api_key", self.api_key.clone())
            .text("signature", signature)
            .part("file", Part::bytes(content.to_vec()).file_name(file_name));

        debug!("Uploading {} ({} bytes) to {}", source, content.len(), endpoint);
        let response = self
            .client
            .post(endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send upload request to {}: {}", endpoint, e);
                Error::UploadFailed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Upload API error (status {}): {}", status, error_text);
            return Err(Error::UploadFailed(format!(
                "status {}: {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::UploadFailed(e.to_string()))?;
        let result: UploadResult = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse upload response: {}\nBody: {}", e, body);
            Error::MalformedResponse(e.to_string())
        })?;

        self.report(format_args!("Uploaded {} as {}", source, result.public_id));
        self.track(source, public_id).await;

        Ok(result)
    }

    async fn track(&self, source: &str, public_id: &str) {
        let Some(tracker) = &self.tracker else {
            return;
        };

        let record = UploadRecord::new(source, public_id);
        if let Err(e) = tracker.insert(&record).await {
            warn!("Failed to record upload of {}: {}", source, e);
        }
    }

    fn report(&self, message: std::fmt::Arguments<'_>) {
        if self.verbose {
            info!("{}", message);
        } else {
            debug!("{}", message);
        }
    }
}

/// Request signature: SHA-1 over the `key=value` pairs sorted by key and
/// joined with `&`, followed by the API secret.
pub fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    hex::encode(Sha1::digest(format!("{}{}", to_sign, api_secret).as_bytes()))
}

fn extension(source: &str) -> String {
    Path::new(source)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
