use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::domain::value_objects::{AdvertId, ImageId};

/// Image attached to an advert.
///
/// The byte payload only lives here between request decoding and the write
/// to the image store; rows loaded from the database never carry it.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    id: ImageId,
    advert_id: AdvertId,
    position: i16,
    created_at: DateTime<Utc>,
    deleted: bool,
    payload: Option<Bytes>,
}

impl Image {
    pub fn new(
        id: ImageId,
        advert_id: AdvertId,
        position: i16,
        payload: Bytes,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            advert_id,
            position,
            created_at,
            deleted: false,
            payload: Some(payload),
        }
    }

    /// Reconstruct from storage (no payload)
    pub fn reconstruct(
        id: ImageId,
        advert_id: AdvertId,
        position: i16,
        created_at: DateTime<Utc>,
        deleted: bool,
    ) -> Self {
        Self {
            id,
            advert_id,
            position,
            created_at,
            deleted,
            payload: None,
        }
    }

    pub fn id(&self) -> &ImageId {
        &self.id
    }

    pub fn advert_id(&self) -> &AdvertId {
        &self.advert_id
    }

    pub fn position(&self) -> i16 {
        self.position
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn payload(&self) -> Option<&Bytes> {
        self.payload.as_ref()
    }

    /// Drop the in-memory bytes once the image store owns them
    pub fn discard_payload(&mut self) {
        self.payload = None;
    }
}
