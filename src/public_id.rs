//! Public ID extraction from delivery URLs

use crate::models::ResourceType;
use crate::service::{Service, DELIVERY_URL};
use crate::{Error, Result};
use url::Url;

/// Recover the public ID from a delivery URL of the form
/// `.../<resource_type>/upload/<public_id>`.
///
/// Exactly one non-empty segment must follow `upload/`. Callers can treat
/// [`Error::UnexpectedUrlPathFormat`] as "not a managed asset".
pub fn public_id(delivered_url: &str) -> Result<String> {
    let unexpected = || Error::UnexpectedUrlPathFormat(delivered_url.to_string());

    let url = Url::parse(delivered_url.trim()).map_err(|_| unexpected())?;
    let segments: Vec<&str> = url.path().split('/').collect();

    match segments.as_slice() {
        [.., resource_type, "upload", id] if !resource_type.is_empty() && !id.is_empty() => {
            urlencoding::decode(id)
                .map(|id| id.into_owned())
                .map_err(|_| unexpected())
        }
        _ => Err(unexpected()),
    }
}

impl Service {
    /// Delivery URL of an uploaded asset.
    pub fn url(&self, public_id: &str, resource_type: ResourceType) -> String {
        format!(
            "{}/{}/{}/upload/{}",
            DELIVERY_URL, self.cloud_name, resource_type, public_id
        )
    }
}
