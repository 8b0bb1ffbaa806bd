// File: src/controller/scanner.rs
//! Scanner screen state machine.
//!
//! ```text
//!   Idle --start (permission granted)--> Scanning --decode / gallery hit--> Result
//!    ^                                      |  ^                              |
//!    +---------------cancel-----------------+  +---------scan another---------+
//! ```
//! The camera session is active exactly while the state is `Scanning`.
use crate::error::{AppError, Notice};
use crate::model::{ScanEvent, ScanResult, ScannerState};
use crate::platform::{Camera, Clipboard, ImagePicker, Platform, StaticDecoder, UrlOpener};
use std::sync::Arc;

/// Result of a start request from `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Scanning,
    /// Permission was missing; it has been requested and the state is still `Idle`.
    PermissionRequested { granted: bool },
}

/// Result of picking a gallery image while scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Cancelled,
    Found(ScanResult),
    NoCodeFound,
}

impl PickOutcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            PickOutcome::Cancelled => None,
            PickOutcome::Found(_) => Some(Notice::success("QR Code found in image!")),
            PickOutcome::NoCodeFound => Some(Notice::new(
                "No QR Code",
                "Could not find a valid QR code in the selected image.",
            )),
        }
    }
}

pub struct ScannerController {
    state: ScannerState,
    camera: Arc<dyn Camera>,
    picker: Arc<dyn ImagePicker>,
    decoder: Option<Arc<dyn StaticDecoder>>,
    clipboard: Arc<dyn Clipboard>,
    urls: Arc<dyn UrlOpener>,
}

impl ScannerController {
    pub fn new(platform: &Platform) -> Self {
        Self {
            state: ScannerState::Idle,
            camera: platform.camera.clone(),
            picker: platform.picker.clone(),
            decoder: platform.decoder.clone(),
            clipboard: platform.clipboard.clone(),
            urls: platform.urls.clone(),
        }
    }

    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    pub fn result(&self) -> Option<&ScanResult> {
        self.state.result()
    }

    fn invalid(&self, event: &'static str) -> AppError {
        AppError::InvalidTransition {
            state: self.state.name(),
            event,
        }
    }

    pub async fn has_permission(&self) -> Result<bool, AppError> {
        self.camera
            .has_permission()
            .await
            .map_err(|e| AppError::capability("Error", "Failed to query camera permission", &e))
    }

    /// Asks for camera access. The state stays `Idle` either way.
    pub async fn request_permission(&mut self) -> Result<bool, AppError> {
        if self.state != ScannerState::Idle {
            return Err(self.invalid("request camera permission"));
        }
        let granted = self
            .camera
            .request_permission()
            .await
            .map_err(|e| AppError::capability("Error", "Failed to request camera permission", &e))?;
        log::info!("Camera permission granted: {}", granted);
        Ok(granted)
    }

    /// Starts live scanning, or requests permission first if it is missing.
    pub async fn start(&mut self) -> Result<StartOutcome, AppError> {
        if self.state != ScannerState::Idle {
            return Err(self.invalid("start scanning"));
        }
        if !self.has_permission().await? {
            let granted = self.request_permission().await?;
            return Ok(StartOutcome::PermissionRequested { granted });
        }
        self.activate_camera().await?;
        Ok(StartOutcome::Scanning)
    }

    async fn activate_camera(&mut self) -> Result<(), AppError> {
        self.camera
            .activate()
            .await
            .map_err(|e| AppError::capability("Error", "Failed to start camera", &e))?;
        self.state = ScannerState::Scanning;
        Ok(())
    }

    /// Feeds one live decode event. Events arriving outside `Scanning`, or with an
    /// empty payload, are ignored. Returns true when the event produced a result.
    pub async fn handle_scan_event(&mut self, event: ScanEvent) -> bool {
        if !self.state.is_scanning() {
            log::debug!("Ignoring {} scan while {}", event.kind, self.state.name());
            return false;
        }
        let Some(result) = ScanResult::new(event.data) else {
            return false;
        };
        self.camera.deactivate().await;
        self.state = ScannerState::Result(result);
        true
    }

    pub async fn cancel(&mut self) -> Result<(), AppError> {
        if !self.state.is_scanning() {
            return Err(self.invalid("cancel scanning"));
        }
        self.camera.deactivate().await;
        self.state = ScannerState::Idle;
        Ok(())
    }

    /// Lets the user pick an image and decodes the first QR code in it.
    /// A miss keeps the live session running.
    pub async fn pick_from_gallery(&mut self) -> Result<PickOutcome, AppError> {
        if !self.state.is_scanning() {
            return Err(self.invalid("scan from gallery"));
        }

        let fail = |e: anyhow::Error| AppError::capability("Error", "Failed to scan image", &e);

        let Some(path) = self.picker.pick_image().await.map_err(fail)? else {
            return Ok(PickOutcome::Cancelled);
        };

        let Some(decoder) = &self.decoder else {
            return Err(AppError::Unavailable {
                title: "Feature Unavailable",
                message: "Scanning from gallery requires a native build update.",
                fallback: None,
            });
        };

        let codes = decoder.decode_from_image_path(&path).await.map_err(fail)?;
        let Some(result) = codes.into_iter().find_map(|c| ScanResult::new(c.data)) else {
            log::debug!("No QR code in {}", path.display());
            return Ok(PickOutcome::NoCodeFound);
        };

        self.camera.deactivate().await;
        self.state = ScannerState::Result(result.clone());
        Ok(PickOutcome::Found(result))
    }

    /// Clears the current result and goes back to live scanning.
    pub async fn scan_another(&mut self) -> Result<(), AppError> {
        if self.state.result().is_none() {
            return Err(self.invalid("scan another"));
        }
        // The result stays on screen if the camera cannot restart.
        self.activate_camera().await
    }

    pub async fn copy_to_clipboard(&self) -> Result<Notice, AppError> {
        let result = self.result().ok_or_else(|| self.invalid("copy a result"))?;
        self.clipboard
            .write_text(result.as_str())
            .await
            .map_err(|e| AppError::capability("Error", "Failed to copy", &e))?;
        Ok(Notice::success("Copied to clipboard!"))
    }

    /// Opens the result as a link. Only "cannot open" is reported; any error
    /// raised while checking or opening is dropped.
    pub async fn open_link(&self) -> Result<(), AppError> {
        let result = self.result().ok_or_else(|| self.invalid("open a link"))?;
        if !result.is_openable() {
            return Err(AppError::Precondition("The scanned content is not a link."));
        }

        let url = result.as_str();
        match self.urls.can_open(url).await {
            Ok(true) => {
                if let Err(e) = self.urls.open(url).await {
                    log::warn!("Opening {} failed: {:#}", url, e);
                }
                Ok(())
            }
            Ok(false) => Err(AppError::Capability {
                title: "Error",
                context: "Cannot open this link",
                cause: url.to_string(),
            }),
            Err(e) => {
                log::warn!("Checking {} failed: {:#}", url, e);
                Ok(())
            }
        }
    }
}
