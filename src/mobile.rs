/* socialqr/src/mobile.rs
 *
 * UniFFI interface exposing the link builder and the pure screen state to
 * mobile platforms. Capture, sharing, gallery and camera stay native; the
 * host app feeds their outcomes back through these objects.
 */

use crate::error::AppError;
use crate::model::{
    COUNTRY_CODES, DEFAULT_COUNTRY_CODE, Field, FieldSet, Mode, ScanResult, ScannerState,
    SocialForm, TextForm, link,
};
use std::collections::HashMap;
use std::str::FromStr;
use tokio::sync::Mutex;

#[derive(Debug, uniffi::Error)]
#[uniffi(flat_error)]
pub enum MobileError {
    Generic(String),
    /// A user-facing alert; the host shows `title` above the message.
    Alert { title: String, message: String },
}
impl From<String> for MobileError {
    fn from(e: String) -> Self {
        Self::Generic(e)
    }
}
impl From<&str> for MobileError {
    fn from(e: &str) -> Self {
        Self::Generic(e.to_string())
    }
}
impl From<anyhow::Error> for MobileError {
    fn from(e: anyhow::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
impl From<AppError> for MobileError {
    fn from(e: AppError) -> Self {
        let notice = e.to_notice();
        Self::Alert {
            title: notice.title,
            message: notice.message,
        }
    }
}
impl std::fmt::Display for MobileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MobileError::Generic(s) => write!(f, "{}", s),
            MobileError::Alert { title, message } => write!(f, "{}: {}", title, message),
        }
    }
}
impl std::error::Error for MobileError {}

#[derive(uniffi::Record)]
pub struct MobileModeInfo {
    pub id: String,
    pub label: String,
    pub subtitle: String,
    pub accent_color: String,
    pub icon: String,
    pub button_icon: String,
    pub placeholder: String,
    /// camelCase field names, in display order.
    pub fields: Vec<String>,
}

#[derive(uniffi::Record)]
pub struct MobileCountryCode {
    pub label: String,
    pub value: String,
}

#[derive(uniffi::Record)]
pub struct MobileCaptureTarget {
    pub qr_value: String,
    pub custom_message: Option<String>,
    pub caption: Option<String>,
}

#[derive(uniffi::Record)]
pub struct MobileScannerState {
    /// One of "idle", "scanning", "result".
    pub state: String,
    pub result: Option<String>,
    pub is_openable: bool,
}

fn parse_mode(id: &str) -> Result<Mode, MobileError> {
    Mode::from_str(id).map_err(|_| MobileError::from(format!("Unknown mode '{}'", id)))
}

fn parse_field(name: &str) -> Result<Field, MobileError> {
    Field::from_str(name).map_err(|_| MobileError::from(format!("Unknown field '{}'", name)))
}

fn mode_info(mode: Mode) -> MobileModeInfo {
    let info = mode.info();
    MobileModeInfo {
        id: mode.to_string(),
        label: info.label.to_string(),
        subtitle: info.subtitle.to_string(),
        accent_color: info.accent_color.to_string(),
        icon: info.icon.to_string(),
        button_icon: info.button_icon.to_string(),
        placeholder: info.placeholder.to_string(),
        fields: mode.fields().iter().map(|f| f.to_string()).collect(),
    }
}

#[uniffi::export]
pub fn list_modes() -> Vec<MobileModeInfo> {
    Mode::all().into_iter().map(mode_info).collect()
}

#[uniffi::export]
pub fn list_country_codes() -> Vec<MobileCountryCode> {
    COUNTRY_CODES
        .iter()
        .map(|c| MobileCountryCode {
            label: c.label.to_string(),
            value: c.value.to_string(),
        })
        .collect()
}

/// Stateless link building for hosts that keep their own form state.
#[uniffi::export]
pub fn build_link(mode: String, fields: HashMap<String, String>) -> Result<String, MobileError> {
    let mode = parse_mode(&mode)?;
    let mut set = FieldSet::default();
    for (name, value) in fields {
        set.set(parse_field(&name)?, value);
    }
    Ok(link::build_link(mode, &set)?)
}

#[uniffi::export]
pub fn is_openable(text: String) -> bool {
    crate::model::is_openable(&text)
}

fn scanner_snapshot(state: &ScannerState) -> MobileScannerState {
    MobileScannerState {
        state: state.id().to_string(),
        result: state.result().map(|r| r.as_str().to_string()),
        is_openable: state.result().is_some_and(|r| r.is_openable()),
    }
}

fn invalid(state: &ScannerState, event: &'static str) -> MobileError {
    AppError::InvalidTransition {
        state: state.name(),
        event,
    }
    .into()
}

#[derive(uniffi::Object)]
pub struct SocialQrMobile {
    social: Mutex<SocialForm>,
    text: Mutex<TextForm>,
    scanner: Mutex<ScannerState>,
}

#[uniffi::export(async_runtime = "tokio")]
impl SocialQrMobile {
    #[uniffi::constructor]
    pub fn new(default_country_code: Option<String>) -> Self {
        #[cfg(target_os = "android")]
        android_logger::init_once(
            android_logger::Config::default()
                .with_max_level(log::LevelFilter::Debug)
                .with_tag("SocialQrRust"),
        );
        let code = default_country_code.unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string());
        Self {
            social: Mutex::new(SocialForm::new(
                Mode::default(),
                FieldSet::with_country_code(&code),
            )),
            text: Mutex::new(TextForm::default()),
            scanner: Mutex::new(ScannerState::Idle),
        }
    }

    // --- SOCIAL SCREEN ---

    pub async fn mode(&self) -> String {
        self.social.lock().await.mode().to_string()
    }

    /// Switching mode clears the generated value.
    pub async fn switch_mode(&self, mode: String) -> Result<(), MobileError> {
        let mode = parse_mode(&mode)?;
        self.social.lock().await.switch_mode(mode);
        Ok(())
    }

    pub async fn field(&self, name: String) -> Result<String, MobileError> {
        let field = parse_field(&name)?;
        Ok(self.social.lock().await.fields().get(field).to_string())
    }

    pub async fn update_field(&self, name: String, value: String) -> Result<(), MobileError> {
        let field = parse_field(&name)?;
        self.social.lock().await.update_field(field, value);
        Ok(())
    }

    pub async fn clear_field(&self, name: String) -> Result<(), MobileError> {
        let field = parse_field(&name)?;
        self.social.lock().await.clear_field(field);
        Ok(())
    }

    pub async fn generate_social(&self) -> Result<String, MobileError> {
        let mut form = self.social.lock().await;
        Ok(form.generate()?.to_string())
    }

    pub async fn social_qr_value(&self) -> Option<String> {
        self.social.lock().await.qr_value().map(str::to_string)
    }

    /// What the host should render before sharing or saving.
    pub async fn social_capture_target(&self) -> Option<MobileCaptureTarget> {
        self.social.lock().await.capture_target().map(|t| MobileCaptureTarget {
            qr_value: t.qr_value,
            custom_message: t.custom_message,
            caption: t.caption,
        })
    }

    // --- GENERATOR SCREEN ---

    pub async fn set_text_content(&self, content: String) {
        self.text.lock().await.content = content;
    }

    pub async fn set_text_message(&self, message: String) {
        self.text.lock().await.custom_message = message;
    }

    pub async fn generate_text(&self) -> Result<String, MobileError> {
        let mut form = self.text.lock().await;
        Ok(form.generate()?.to_string())
    }

    pub async fn text_capture_target(&self) -> Option<MobileCaptureTarget> {
        self.text.lock().await.capture_target().map(|t| MobileCaptureTarget {
            qr_value: t.qr_value,
            custom_message: t.custom_message,
            caption: t.caption,
        })
    }

    // --- SCANNER SCREEN ---

    pub async fn scanner_state(&self) -> MobileScannerState {
        scanner_snapshot(&*self.scanner.lock().await)
    }

    /// Call once the native camera session is running.
    pub async fn scanner_started(&self) -> Result<MobileScannerState, MobileError> {
        let mut state = self.scanner.lock().await;
        if *state != ScannerState::Idle {
            return Err(invalid(&state, "start scanning"));
        }
        *state = ScannerState::Scanning;
        Ok(scanner_snapshot(&state))
    }

    /// Feeds a decoded payload from the live camera or a picked image.
    /// Returns true if the scanner moved to the result state.
    pub async fn scanner_code_found(&self, data: String) -> bool {
        let mut state = self.scanner.lock().await;
        if !state.is_scanning() {
            log::debug!("Ignoring code while {}", state.name());
            return false;
        }
        match ScanResult::new(data) {
            Some(result) => {
                *state = ScannerState::Result(result);
                true
            }
            None => false,
        }
    }

    pub async fn scanner_cancel(&self) -> Result<(), MobileError> {
        let mut state = self.scanner.lock().await;
        if !state.is_scanning() {
            return Err(invalid(&state, "cancel scanning"));
        }
        *state = ScannerState::Idle;
        Ok(())
    }

    pub async fn scanner_scan_another(&self) -> Result<(), MobileError> {
        let mut state = self.scanner.lock().await;
        if state.result().is_none() {
            return Err(invalid(&state, "scan another"));
        }
        *state = ScannerState::Scanning;
        Ok(())
    }
}
