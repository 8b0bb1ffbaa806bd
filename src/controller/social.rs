// File: src/controller/social.rs
use crate::config::Config;
use crate::context::{AppContext, SOCIAL_SHARE_FILE};
use crate::controller::{Exporter, UiHints};
use crate::error::{AppError, Notice};
use crate::model::{CaptureTarget, Field, FieldSet, Mode, SocialForm};
use crate::platform::Platform;
use std::path::PathBuf;
use std::sync::Arc;

const NOTHING_TO_EXPORT: &str = "Generate a QR code before sharing or saving it.";

/// Social/contact link QR screen.
pub struct SocialController {
    form: SocialForm,
    exporter: Exporter,
    album: String,
    hints: UiHints,
}

impl SocialController {
    pub fn new(ctx: Arc<dyn AppContext>, platform: Platform, cfg: &Config) -> Self {
        let fields = FieldSet::with_country_code(&cfg.default_country_code);
        Self {
            form: SocialForm::new(cfg.default_mode, fields),
            exporter: Exporter::new(ctx, platform),
            album: cfg.album_name.clone(),
            hints: UiHints::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.form.mode()
    }

    pub fn fields(&self) -> &FieldSet {
        self.form.fields()
    }

    pub fn field(&self, field: Field) -> &str {
        self.form.fields().get(field)
    }

    pub fn qr_value(&self) -> Option<&str> {
        self.form.qr_value()
    }

    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.update_field(field, value);
    }

    pub fn clear_field(&mut self, field: Field) {
        self.form.clear_field(field);
    }

    pub fn switch_mode(&mut self, mode: Mode) {
        log::debug!("Social mode -> {}", mode);
        self.form.switch_mode(mode);
    }

    pub fn generate(&mut self) -> Result<String, AppError> {
        let link = self.form.generate()?.to_string();
        log::debug!("Generated {} link: {}", self.form.mode(), link);
        self.hints = UiHints::after_generate();
        Ok(link)
    }

    pub fn capture_target(&self) -> Option<CaptureTarget> {
        self.form.capture_target()
    }

    pub async fn share_image(&self) -> Result<PathBuf, AppError> {
        let target = self
            .capture_target()
            .ok_or(AppError::Precondition(NOTHING_TO_EXPORT))?;
        self.exporter
            .share(&target, SOCIAL_SHARE_FILE, "Failed to share image")
            .await
    }

    pub async fn save_to_gallery(&self) -> Result<Notice, AppError> {
        let target = self
            .capture_target()
            .ok_or(AppError::Precondition(NOTHING_TO_EXPORT))?;
        self.exporter.save_to_gallery(&target, &self.album).await
    }

    pub fn take_ui_hints(&mut self) -> UiHints {
        std::mem::take(&mut self.hints)
    }
}
