// File: ./src/model/form.rs
//! Pure screen state for the two generator screens.
//!
//! These hold the inputs and the generated QR value and enforce the
//! state invariants; the async controllers wrap them with platform side effects.
use crate::error::AppError;
use crate::model::fields::{Field, FieldSet};
use crate::model::link;
use crate::model::mode::Mode;

/// What a view capture renders: the QR symbol plus its optional captions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTarget {
    pub qr_value: String,
    /// User label shown above the symbol, embedded verbatim.
    pub custom_message: Option<String>,
    /// Mode-specific caption shown below the symbol (social screen only).
    pub caption: Option<String>,
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialForm {
    mode: Mode,
    fields: FieldSet,
    qr_value: Option<String>,
}

impl Default for SocialForm {
    fn default() -> Self {
        Self::new(Mode::default(), FieldSet::default())
    }
}

impl SocialForm {
    pub fn new(mode: Mode, fields: FieldSet) -> Self {
        Self {
            mode,
            fields,
            qr_value: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn qr_value(&self) -> Option<&str> {
        self.qr_value.as_deref()
    }

    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    pub fn clear_field(&mut self, field: Field) {
        self.fields.clear(field);
    }

    /// Activates `mode` and drops the generated value. Field entries for every
    /// mode are kept so switching back restores them.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.qr_value = None;
    }

    /// Rebuilds the link for the active mode. On a validation error the
    /// previous value is left in place.
    pub fn generate(&mut self) -> Result<&str, AppError> {
        let link = link::build_link(self.mode, &self.fields)?;
        Ok(self.qr_value.insert(link).as_str())
    }

    pub fn capture_target(&self) -> Option<CaptureTarget> {
        let qr_value = self.qr_value.clone()?;
        Some(CaptureTarget {
            qr_value,
            custom_message: non_empty(self.fields.get(Field::CustomMessage)),
            caption: Some(link::display_label(self.mode, &self.fields)),
        })
    }
}

/// Free-text generator state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextForm {
    pub content: String,
    pub custom_message: String,
    qr_value: Option<String>,
}

impl TextForm {
    pub fn qr_value(&self) -> Option<&str> {
        self.qr_value.as_deref()
    }

    /// Uses the content verbatim; only a blank content is rejected.
    pub fn generate(&mut self) -> Result<&str, AppError> {
        if self.content.trim().is_empty() {
            return Err(AppError::Validation {
                title: "Input Required",
                message: "Please enter some text or a URL to generate a QR code.",
            });
        }
        Ok(self.qr_value.insert(self.content.clone()).as_str())
    }

    pub fn capture_target(&self) -> Option<CaptureTarget> {
        let qr_value = self.qr_value.clone()?;
        Some(CaptureTarget {
            qr_value,
            custom_message: non_empty(&self.custom_message),
            caption: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switching_mode_clears_value_but_keeps_fields() {
        let mut form = SocialForm::default();
        form.update_field(Field::PhoneNumber, "9876543210");
        form.generate().unwrap();
        assert!(form.qr_value().is_some());

        form.switch_mode(Mode::Email);
        assert_eq!(form.qr_value(), None);

        form.switch_mode(Mode::Whatsapp);
        assert_eq!(form.fields().get(Field::PhoneNumber), "9876543210");
        assert_eq!(form.qr_value(), None);
    }

    #[test]
    fn failed_generate_keeps_previous_value() {
        let mut form = SocialForm::default();
        form.update_field(Field::PhoneNumber, "123");
        form.generate().unwrap();
        form.update_field(Field::PhoneNumber, "   ");
        assert!(form.generate().is_err());
        assert_eq!(form.qr_value(), Some("https://wa.me/91123"));
    }

    #[test]
    fn text_form_keeps_content_verbatim() {
        let mut form = TextForm {
            content: "  hello world  ".to_string(),
            ..Default::default()
        };
        assert_eq!(form.generate().unwrap(), "  hello world  ");
    }

    #[test]
    fn capture_target_requires_value() {
        let mut form = TextForm::default();
        assert!(form.capture_target().is_none());
        form.content = "x".to_string();
        form.custom_message = "Scan me".to_string();
        form.generate().unwrap();
        let target = form.capture_target().unwrap();
        assert_eq!(target.custom_message.as_deref(), Some("Scan me"));
        assert!(target.caption.is_none());
    }
}
