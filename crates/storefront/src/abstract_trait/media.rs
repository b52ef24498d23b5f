use crate::{domain::requests::ImageUpload, media::MediaError};
use async_trait::async_trait;
use std::sync::Arc;

/// A file stored on the media host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
}

pub type DynMediaStore = Arc<dyn MediaStoreTrait + Send + Sync>;

#[async_trait]
pub trait MediaStoreTrait {
    async fn upload(&self, image: &ImageUpload) -> Result<UploadedImage, MediaError>;
    async fn destroy(&self, public_id: &str) -> Result<(), MediaError>;
}
