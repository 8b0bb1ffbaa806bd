// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::config::Config;
use crate::context::AppContext;
use crate::controller::{GeneratorController, ScannerController, SocialController, UiHints};
use crate::error::Notice;
use crate::model::Field;
use crate::platform::desktop::DesktopPlatform;
use crate::tui::action::Tab;
use std::sync::Arc;

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Generator tab inputs, in focus order.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum GeneratorInput {
    Content,
    CustomMessage,
}

pub struct AppState {
    pub desktop: DesktopPlatform,
    pub social: SocialController,
    pub generator: GeneratorController,
    pub scanner: ScannerController,

    // UI State
    pub tab: Tab,
    pub mode: InputMode,
    pub social_focus: usize,
    pub generator_focus: GeneratorInput,
    pub scan_input: String,
    pub message: String,
    pub notice: Option<Notice>,
    pub show_full_help: bool,
    pub result_highlighted: bool,
}

impl AppState {
    pub fn new(ctx: Arc<dyn AppContext>, cfg: &Config) -> Self {
        let desktop = DesktopPlatform::new(ctx.clone(), cfg.qr_module_pixels);
        Self::with_desktop(ctx, cfg, desktop)
    }

    pub fn with_desktop(ctx: Arc<dyn AppContext>, cfg: &Config, desktop: DesktopPlatform) -> Self {
        let platform = desktop.platform();
        Self {
            social: SocialController::new(ctx.clone(), platform.clone(), cfg),
            generator: GeneratorController::new(ctx, platform.clone()),
            scanner: ScannerController::new(&platform),
            desktop,
            tab: Tab::default(),
            mode: InputMode::Normal,
            social_focus: 0,
            generator_focus: GeneratorInput::Content,
            scan_input: String::new(),
            message: String::from("Ready."),
            notice: None,
            show_full_help: false,
            result_highlighted: false,
        }
    }

    /// Field under the cursor on the social tab.
    pub fn focused_field(&self) -> Field {
        let fields = self.social.mode().fields();
        fields[self.social_focus.min(fields.len() - 1)]
    }

    pub fn next_field(&mut self) {
        match self.tab {
            Tab::Social => {
                let len = self.social.mode().fields().len();
                self.social_focus = (self.social_focus + 1) % len;
            }
            Tab::Generator => {
                self.generator_focus = match self.generator_focus {
                    GeneratorInput::Content => GeneratorInput::CustomMessage,
                    GeneratorInput::CustomMessage => GeneratorInput::Content,
                }
            }
            Tab::Scanner => {}
        }
    }

    pub fn previous_field(&mut self) {
        match self.tab {
            Tab::Social => {
                let len = self.social.mode().fields().len();
                self.social_focus = (self.social_focus + len - 1) % len;
            }
            _ => self.next_field(),
        }
    }

    /// Text of whatever input currently has focus.
    pub fn focused_text(&self) -> &str {
        match self.tab {
            Tab::Social => self.social.field(self.focused_field()),
            Tab::Generator => match self.generator_focus {
                GeneratorInput::Content => self.generator.content(),
                GeneratorInput::CustomMessage => self.generator.custom_message(),
            },
            Tab::Scanner => &self.scan_input,
        }
    }

    pub fn set_focused_text(&mut self, value: String) {
        match self.tab {
            Tab::Social => {
                let field = self.focused_field();
                self.social.update_field(field, value);
            }
            Tab::Generator => match self.generator_focus {
                GeneratorInput::Content => self.generator.set_content(value),
                GeneratorInput::CustomMessage => self.generator.set_custom_message(value),
            },
            Tab::Scanner => self.scan_input = value,
        }
    }

    pub fn apply_hints(&mut self, hints: UiHints) {
        if hints.dismiss_keyboard {
            self.mode = InputMode::Normal;
        }
        self.result_highlighted = hints.scroll_to_result;
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.message = notice.message.clone();
        self.notice = Some(notice);
    }
}
