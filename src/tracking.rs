//! Upload bookkeeping in MongoDB
//!
//! One [`UploadRecord`] is inserted per successful upload into a collection
//! named after the cloud.

use crate::service::parse_descriptor;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SCHEME: &str = "mongodb";

/// Database used when the descriptor names none.
const DEFAULT_DATABASE: &str = "cloudinary";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadRecord {
    pub id: Uuid,
    pub path: String,
    pub public_id: String,
    pub uploaded_at: DateTime<Utc>,
}

impl UploadRecord {
    pub fn new(path: &str, public_id: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.to_string(),
            public_id: public_id.to_string(),
            uploaded_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tracker {
    client: Client,
    collection: Collection<UploadRecord>,
}

impl Tracker {
    /// Open a session, check the server answers, and resolve the cloud's
    /// collection.
    pub async fn connect(descriptor: &str, cloud_name: &str) -> Result<Self> {
        let tracker = Self::open(descriptor, cloud_name).await?;
        tracker.ping().await?;
        Ok(tracker)
    }

    /// Resolve handles without contacting the server. The driver connects
    /// lazily on first use.
    pub(crate) async fn open(descriptor: &str, cloud_name: &str) -> Result<Self> {
        let url = parse_descriptor(descriptor, SCHEME)?;

        let options = ClientOptions::parse(url.as_str())
            .await
            .map_err(|e| Error::InvalidDescriptor {
                descriptor: descriptor.to_string(),
                reason: e.to_string(),
            })?;
        let client = Client::with_options(options)
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;

        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        let collection = database.collection::<UploadRecord>(cloud_name);

        Ok(Self { client, collection })
    }

    async fn ping(&self) -> Result<()> {
        self.collection_database()
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        Ok(())
    }

    fn collection_database(&self) -> mongodb::Database {
        self.client.database(&self.collection.namespace().db)
    }

    pub fn collection_name(&self) -> &str {
        self.collection.name()
    }

    pub async fn insert(&self, record: &UploadRecord) -> Result<()> {
        self.collection
            .insert_one(record)
            .await
            .map_err(|e| Error::StoreUnavailable(e.to_string()))?;
        tracing::debug!(
            "Recorded upload of {} as {} in {}",
            record.path,
            record.public_id,
            self.collection.namespace()
        );
        Ok(())
    }
}
