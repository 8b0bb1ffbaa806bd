// File: src/controller.rs
//! Screen controllers.
//! Each screen owns one controller, constructed once, which is the single source of
//! truth for that screen's state. All UI layers (TUI, CLI, Mobile) must delegate
//! actions to these controllers so validation and side-effect ordering stay identical.
pub mod export;
pub mod generator;
pub mod scanner;
pub mod social;

pub use export::Exporter;
pub use generator::GeneratorController;
pub use scanner::{PickOutcome, ScannerController, StartOutcome};
pub use social::SocialController;

/// UI-only requests raised by a successful generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiHints {
    pub scroll_to_result: bool,
    pub dismiss_keyboard: bool,
}

impl UiHints {
    pub(crate) fn after_generate() -> Self {
        Self {
            scroll_to_result: true,
            dismiss_keyboard: true,
        }
    }
}
