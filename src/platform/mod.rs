// File: ./src/platform/mod.rs
//! Host platform capabilities.
//!
//! Controllers never talk to the OS directly: every side effect goes through one
//! of these traits. Each call is awaited on its own; none are fanned out.
pub mod desktop;

use crate::model::CaptureTarget;
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn read_text(&self) -> Result<String>;
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Renders a result view to a temporary image and returns its path.
#[async_trait]
pub trait ViewCapture: Send + Sync {
    async fn capture(&self, target: &CaptureTarget) -> Result<PathBuf>;
}

#[async_trait]
pub trait FileStore: Send + Sync {
    async fn copy_file(&self, from: &Path, to: &Path) -> Result<()>;
}

#[async_trait]
pub trait ShareSheet: Send + Sync {
    async fn share(&self, path: &Path) -> Result<()>;
}

/// Handle to an image persisted in the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: String,
    pub uri: String,
}

#[async_trait]
pub trait Gallery: Send + Sync {
    /// False when the running build cannot write to the gallery at all
    /// (e.g. a stale native build missing the media module).
    fn is_available(&self) -> bool {
        true
    }
    /// Requests write-only access.
    async fn request_write_permission(&self) -> Result<bool>;
    async fn create_asset(&self, path: &Path) -> Result<Asset>;
    async fn add_to_album(&self, album: &str, asset: &Asset) -> Result<()>;
}

/// Live camera decoding. While active, the platform delivers `ScanEvent`s to
/// the scanner controller.
#[async_trait]
pub trait Camera: Send + Sync {
    async fn has_permission(&self) -> Result<bool>;
    /// May wait indefinitely for the user's answer.
    async fn request_permission(&self) -> Result<bool>;
    async fn activate(&self) -> Result<()>;
    async fn deactivate(&self);
}

#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// `None` when the user cancels.
    async fn pick_image(&self) -> Result<Option<PathBuf>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCode {
    pub data: String,
}

/// Static-image QR decoding. Optional: a platform may not ship it.
#[async_trait]
pub trait StaticDecoder: Send + Sync {
    async fn decode_from_image_path(&self, path: &Path) -> Result<Vec<DecodedCode>>;
}

#[async_trait]
pub trait UrlOpener: Send + Sync {
    async fn can_open(&self, url: &str) -> Result<bool>;
    async fn open(&self, url: &str) -> Result<()>;
}

/// The full capability set a host provides.
#[derive(Clone)]
pub struct Platform {
    pub clipboard: Arc<dyn Clipboard>,
    pub capture: Arc<dyn ViewCapture>,
    pub files: Arc<dyn FileStore>,
    pub share: Arc<dyn ShareSheet>,
    pub gallery: Arc<dyn Gallery>,
    pub camera: Arc<dyn Camera>,
    pub picker: Arc<dyn ImagePicker>,
    pub decoder: Option<Arc<dyn StaticDecoder>>,
    pub urls: Arc<dyn UrlOpener>,
}
