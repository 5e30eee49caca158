//! Client library for uploading assets to Cloudinary
//!
//! Derives stable public IDs from local paths, uploads files through the
//! signed upload API, optionally records each upload in MongoDB, and
//! deletes or keeps local files after upload according to a pattern.

pub mod error;
pub mod models;
pub mod naming;
pub mod public_id;
pub mod retention;
pub mod service;
pub mod tracking;
pub mod upload;

pub use error::{Error, Result};
pub use models::{Config, ResourceType, UploadResult};
pub use naming::normalize;
pub use public_id::public_id;
pub use service::Service;
