// File: ./src/model/scan.rs
use std::fmt;

/// Prefixes that make a scanned payload openable as a link.
pub const LINK_PREFIXES: [&str; 4] = ["http://", "https://", "www.", "mailto:"];

/// Case-sensitive literal prefix match against [`LINK_PREFIXES`].
pub fn is_openable(text: &str) -> bool {
    LINK_PREFIXES.iter().any(|prefix| text.starts_with(prefix))
}

/// A decoded, non-empty QR payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanResult(String);

impl ScanResult {
    /// Returns `None` for an empty payload.
    pub fn new(data: impl Into<String>) -> Option<Self> {
        let data = data.into();
        if data.is_empty() { None } else { Some(Self(data)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_openable(&self) -> bool {
        is_openable(&self.0)
    }

}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One event emitted by a live camera decode session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    /// Barcode symbology reported by the platform, e.g. `"qr"`.
    pub kind: String,
    pub data: String,
}

impl ScanEvent {
    pub fn qr(data: impl Into<String>) -> Self {
        Self {
            kind: "qr".to_string(),
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScannerState {
    #[default]
    Idle,
    Scanning,
    Result(ScanResult),
}

impl ScannerState {
    /// Stable machine-readable identifier for hosts that switch on the state.
    pub fn id(&self) -> &'static str {
        match self {
            ScannerState::Idle => "idle",
            ScannerState::Scanning => "scanning",
            ScannerState::Result(_) => "result",
        }
    }

    /// Human phrase used in transition errors.
    pub fn name(&self) -> &'static str {
        match self {
            ScannerState::Idle => "idle",
            ScannerState::Scanning => "scanning",
            ScannerState::Result(_) => "showing a result",
        }
    }

    pub fn result(&self) -> Option<&ScanResult> {
        match self {
            ScannerState::Result(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self, ScannerState::Scanning)
    }
}
