//! Data models and structures
//!
//! Defines the resource kinds, the wire types exchanged with the upload
//! API, and the environment configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Image,
    Raw,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Image => "image",
            ResourceType::Raw => "raw",
        }
    }

    /// Images are recognized by MIME type; everything else uploads raw.
    pub fn from_path(path: &Path) -> Self {
        match mime_guess::from_path(path).first() {
            Some(mime) if mime.type_() == mime_guess::mime::IMAGE => ResourceType::Image,
            _ => ResourceType::Raw,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata returned by the upload API for a stored asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadResult {
    pub public_id: String,
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub format: String,
    pub resource_type: ResourceType,
}

#[derive(Debug, Deserialize)]
pub struct DestroyResponse {
    pub result: String,
}

// Configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub cloudinary_url: String,
    pub mongodb_url: Option<String>,
    pub keep_files: Option<String>,
    pub upload_uri: Option<String>,
    pub verbose: bool,
    pub simulate: bool,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            cloudinary_url: dotenvy::var("CLOUDINARY_URL")?,
            mongodb_url: optional_var("MONGODB_URL"),
            keep_files: optional_var("CLOUDINARY_KEEP_FILES"),
            upload_uri: optional_var("CLOUDINARY_UPLOAD_URI"),
            verbose: flag_var("CLOUDINARY_VERBOSE")?,
            simulate: flag_var("CLOUDINARY_SIMULATE")?,
        })
    }
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn flag_var(key: &str) -> crate::Result<bool> {
    match optional_var(key) {
        None => Ok(false),
        Some(value) => parse_flag(&value).ok_or_else(|| {
            crate::Error::Config(format!("{} must be a boolean, got '{}'", key, value))
        }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_result_deserialization() {
        let body = r#"{"public_id":"tests/test_file","version":1369431906,"format":"png","resource_type":"image"}"#;
        let result: UploadResult = serde_json::from_str(body).unwrap();

        assert_eq!(result.public_id, "tests/test_file");
        assert_eq!(result.version, 1369431906);
        assert_eq!(result.format, "png");
        assert_eq!(result.resource_type, ResourceType::Image);
    }

    #[test]
    fn test_upload_result_ignores_extra_fields() {
        let body = r#"{"public_id":"doc","resource_type":"raw","bytes":12,"url":"http://x"}"#;
        let result: UploadResult = serde_json::from_str(body).unwrap();

        assert_eq!(result.resource_type, ResourceType::Raw);
        assert_eq!(result.format, "");
    }

    #[test]
    fn test_resource_type_from_path() {
        assert_eq!(ResourceType::from_path(Path::new("a/b.png")), ResourceType::Image);
        assert_eq!(ResourceType::from_path(Path::new("a/b.JPG")), ResourceType::Image);
        assert_eq!(ResourceType::from_path(Path::new("css/default.css")), ResourceType::Raw);
        assert_eq!(ResourceType::from_path(Path::new("README")), ResourceType::Raw);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
