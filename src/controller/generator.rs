// File: src/controller/generator.rs
use crate::context::{AppContext, GENERATOR_SHARE_FILE};
use crate::controller::{Exporter, UiHints};
use crate::error::AppError;
use crate::model::TextForm;
use crate::platform::{Clipboard, Platform};
use std::path::PathBuf;
use std::sync::Arc;

/// Free-text QR generator screen.
pub struct GeneratorController {
    form: TextForm,
    clipboard: Arc<dyn Clipboard>,
    exporter: Exporter,
    hints: UiHints,
}

impl GeneratorController {
    pub fn new(ctx: Arc<dyn AppContext>, platform: Platform) -> Self {
        Self {
            form: TextForm::default(),
            clipboard: platform.clipboard.clone(),
            exporter: Exporter::new(ctx, platform),
            hints: UiHints::default(),
        }
    }

    pub fn content(&self) -> &str {
        &self.form.content
    }

    pub fn custom_message(&self) -> &str {
        &self.form.custom_message
    }

    pub fn qr_value(&self) -> Option<&str> {
        self.form.qr_value()
    }

    pub fn set_content(&mut self, value: impl Into<String>) {
        self.form.content = value.into();
    }

    pub fn set_custom_message(&mut self, value: impl Into<String>) {
        self.form.custom_message = value.into();
    }

    /// Replaces the content with the clipboard text. Returns false (and leaves
    /// the content alone) when the clipboard is empty.
    pub async fn paste(&mut self) -> Result<bool, AppError> {
        let text = self
            .clipboard
            .read_text()
            .await
            .map_err(|e| AppError::capability("Error", "Failed to read clipboard", &e))?;
        if text.is_empty() {
            return Ok(false);
        }
        self.form.content = text;
        Ok(true)
    }

    pub fn generate(&mut self) -> Result<String, AppError> {
        let value = self.form.generate()?.to_string();
        self.hints = UiHints::after_generate();
        Ok(value)
    }

    pub async fn share_image(&self) -> Result<PathBuf, AppError> {
        let target = self
            .form
            .capture_target()
            .ok_or(AppError::Precondition("Generate a QR code before sharing it."))?;
        self.exporter
            .share(&target, GENERATOR_SHARE_FILE, "Failed to save/share image")
            .await
    }

    /// Returns and resets the pending UI hints.
    pub fn take_ui_hints(&mut self) -> UiHints {
        std::mem::take(&mut self.hints)
    }
}
