// File: src/controller/export.rs
//! Capture → copy → share / gallery sequence shared by both generator screens.
//!
//! Each step is awaited in order and the first failure aborts the chain.
//! Files already written by earlier steps are left on disk.
use crate::context::{AppContext, SOCIAL_GALLERY_FILE};
use crate::error::{AppError, Notice, NoticeAction};
use crate::model::CaptureTarget;
use crate::platform::Platform;
use std::path::PathBuf;
use std::sync::Arc;

pub const REBUILD_REQUIRED: &str =
    "Your app needs to be rebuilt to support saving. Please run your build command again.";
pub const GALLERY_PERMISSION: &str =
    "Please grant permission to save images to your gallery in settings.";

#[derive(Clone)]
pub struct Exporter {
    ctx: Arc<dyn AppContext>,
    platform: Platform,
}

impl Exporter {
    pub fn new(ctx: Arc<dyn AppContext>, platform: Platform) -> Self {
        Self { ctx, platform }
    }

    /// Captures `target` and copies the image to `file_name` in the export
    /// directory, then invokes the share sheet with that copy.
    ///
    /// `failure_context` prefixes capture/copy errors; share errors are
    /// reported as "Sharing failed".
    pub async fn share(
        &self,
        target: &CaptureTarget,
        file_name: &str,
        failure_context: &'static str,
    ) -> Result<PathBuf, AppError> {
        let fail = |e: anyhow::Error| AppError::capability("Error", failure_context, &e);

        let dir = self.ctx.get_export_dir().map_err(fail)?;
        let dest = self.capture_to(target, dir.join(file_name)).await.map_err(fail)?;

        self.platform
            .share
            .share(&dest)
            .await
            .map_err(|e| AppError::capability("Error", "Sharing failed", &e))?;

        log::info!("Shared QR image {}", dest.display());
        Ok(dest)
    }

    /// Saves the capture into the gallery and best-effort files it under `album`.
    pub async fn save_to_gallery(
        &self,
        target: &CaptureTarget,
        album: &str,
    ) -> Result<Notice, AppError> {
        let gallery = &self.platform.gallery;
        if !gallery.is_available() {
            return Err(AppError::Unavailable {
                title: "Configuration Error",
                message: REBUILD_REQUIRED,
                fallback: Some(NoticeAction::ShareInstead),
            });
        }

        let fail = |e: anyhow::Error| AppError::capability("Save Error", "", &e);

        let granted = gallery.request_write_permission().await.map_err(fail)?;
        if !granted {
            return Err(AppError::Permission {
                message: GALLERY_PERMISSION,
            });
        }

        // The gallery scanner needs a real `.png` name, so copy out of the capture temp file.
        let dir = self.ctx.get_cache_dir().map_err(fail)?;
        let file = self
            .capture_to(target, dir.join(SOCIAL_GALLERY_FILE))
            .await
            .map_err(fail)?;

        let asset = gallery.create_asset(&file).await.map_err(fail)?;
        if let Err(e) = gallery.add_to_album(album, &asset).await {
            log::warn!("Album creation error: {:#}", e);
        }

        log::info!("Saved QR image to gallery as asset {}", asset.id);
        Ok(Notice::success("QR Code saved to Gallery!"))
    }

    async fn capture_to(&self, target: &CaptureTarget, dest: PathBuf) -> anyhow::Result<PathBuf> {
        let captured = self.platform.capture.capture(target).await?;
        self.platform.files.copy_file(&captured, &dest).await?;
        Ok(dest)
    }
}
