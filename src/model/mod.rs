// File: ./src/model/mod.rs
pub mod fields;
pub mod form;
pub mod link;
pub mod mode;
pub mod scan;

pub use fields::{Field, FieldSet};
pub use form::{CaptureTarget, SocialForm, TextForm};
pub use link::build_link;
pub use mode::{COUNTRY_CODES, CountryCode, DEFAULT_COUNTRY_CODE, Mode, ModeInfo, next_country_code};
pub use scan::{ScanEvent, ScanResult, ScannerState, is_openable};
