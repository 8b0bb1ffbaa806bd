// Defines tabs and the actions dispatched from key handling to the controllers.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Social,
    Generator,
    Scanner,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Social, Tab::Generator, Tab::Scanner];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Social => "Social",
            Tab::Generator => "Generator",
            Tab::Scanner => "Scanner",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Generate,
    Share,
    SaveToGallery,
    Paste,
    StartScan,
    CancelScan,
    /// Typed payload submitted as a live camera frame.
    SubmitFrame(String),
    /// Typed image path handed to the picker; empty means the user cancelled.
    PickImage(String),
    ScanAnother,
    CopyResult,
    OpenLink,
}
