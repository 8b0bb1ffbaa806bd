// File: ./src/model/mode.rs
// Social link modes and their display catalogue.
use crate::model::fields::Field;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The contact/profile type selected on the social screen.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    #[default]
    Whatsapp,
    Instagram,
    Twitter,
    Linkedin,
    Github,
    Facebook,
    Email,
}

/// Static presentation data for a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeInfo {
    pub label: &'static str,
    pub subtitle: &'static str,
    pub accent_color: &'static str,
    pub icon: &'static str,
    pub button_icon: &'static str,
    pub placeholder: &'static str,
    /// Alert title/message used when the required field is blank.
    pub missing_title: &'static str,
    pub missing_message: &'static str,
}

impl Mode {
    pub fn all() -> Vec<Mode> {
        Mode::iter().collect()
    }

    pub fn info(self) -> &'static ModeInfo {
        match self {
            Mode::Whatsapp => &WHATSAPP,
            Mode::Instagram => &INSTAGRAM,
            Mode::Twitter => &TWITTER,
            Mode::Linkedin => &LINKEDIN,
            Mode::Github => &GITHUB,
            Mode::Facebook => &FACEBOOK,
            Mode::Email => &EMAIL,
        }
    }

    /// The field that must be non-blank before a link can be built.
    pub fn required_field(self) -> Field {
        match self {
            Mode::Whatsapp => Field::PhoneNumber,
            Mode::Instagram => Field::InstagramUsername,
            Mode::Twitter => Field::TwitterHandle,
            Mode::Linkedin => Field::LinkedinProfile,
            Mode::Github => Field::GithubUsername,
            Mode::Facebook => Field::FacebookProfile,
            Mode::Email => Field::EmailAddress,
        }
    }

    /// All input fields shown while this mode is active, in display order.
    /// `customMessage` is shared by every mode and always listed last.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Mode::Whatsapp => &[Field::CountryCode, Field::PhoneNumber, Field::CustomMessage],
            Mode::Instagram => &[Field::InstagramUsername, Field::CustomMessage],
            Mode::Twitter => &[Field::TwitterHandle, Field::CustomMessage],
            Mode::Linkedin => &[Field::LinkedinProfile, Field::CustomMessage],
            Mode::Github => &[Field::GithubUsername, Field::CustomMessage],
            Mode::Facebook => &[Field::FacebookProfile, Field::CustomMessage],
            Mode::Email => &[
                Field::EmailAddress,
                Field::EmailSubject,
                Field::EmailBody,
                Field::CustomMessage,
            ],
        }
    }

    pub fn next(self) -> Mode {
        let all = Mode::all();
        let idx = all.iter().position(|m| *m == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn previous(self) -> Mode {
        let all = Mode::all();
        let idx = all.iter().position(|m| *m == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

const WHATSAPP: ModeInfo = ModeInfo {
    label: "WhatsApp",
    subtitle: "Direct Message via WhatsApp",
    accent_color: "#25D366",
    icon: "whatsapp",
    button_icon: "whatsapp",
    placeholder: "Enter phone number",
    missing_title: "Phone Number Required",
    missing_message: "Please enter a valid phone number.",
};

const INSTAGRAM: ModeInfo = ModeInfo {
    label: "Instagram",
    subtitle: "Link to Instagram Profile",
    accent_color: "#C13584",
    icon: "instagram",
    button_icon: "instagram",
    placeholder: "@username",
    missing_title: "Username Required",
    missing_message: "Please enter a valid Instagram username.",
};

const TWITTER: ModeInfo = ModeInfo {
    label: "Twitter/X",
    subtitle: "Link to X (Twitter) Profile",
    accent_color: "#1DA1F2",
    icon: "twitter",
    button_icon: "twitter",
    placeholder: "@handle",
    missing_title: "Handle Required",
    missing_message: "Please enter a valid Twitter/X handle.",
};

const LINKEDIN: ModeInfo = ModeInfo {
    label: "LinkedIn",
    subtitle: "Link to LinkedIn Profile",
    accent_color: "#0077B5",
    icon: "linkedin",
    button_icon: "linkedin",
    placeholder: "e.g. john-doe-123",
    missing_title: "Profile Required",
    missing_message: "Please enter a valid LinkedIn profile ID.",
};

const GITHUB: ModeInfo = ModeInfo {
    label: "GitHub",
    subtitle: "Link to GitHub Profile",
    accent_color: "#333333",
    icon: "github",
    button_icon: "github",
    placeholder: "username",
    missing_title: "Username Required",
    missing_message: "Please enter a valid GitHub username.",
};

const FACEBOOK: ModeInfo = ModeInfo {
    label: "Facebook",
    subtitle: "Link to Facebook Profile",
    accent_color: "#1877F2",
    icon: "facebook",
    button_icon: "facebook",
    placeholder: "username or id",
    missing_title: "Profile Required",
    missing_message: "Please enter a valid Facebook page/profile ID.",
};

const EMAIL: ModeInfo = ModeInfo {
    label: "Email",
    subtitle: "Compose Email via QR",
    accent_color: "#EA4335",
    icon: "email",
    button_icon: "email-plus",
    placeholder: "name@example.com",
    missing_title: "Email Required",
    missing_message: "Please enter a valid email address.",
};

/// A selectable WhatsApp dialling prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryCode {
    pub label: &'static str,
    pub value: &'static str,
}

pub const DEFAULT_COUNTRY_CODE: &str = "91";

pub const COUNTRY_CODES: &[CountryCode] = &[
    CountryCode { label: "India (+91)", value: "91" },
    CountryCode { label: "USA/Canada (+1)", value: "1" },
    CountryCode { label: "UK (+44)", value: "44" },
    CountryCode { label: "Australia (+61)", value: "61" },
    CountryCode { label: "UAE (+971)", value: "971" },
    CountryCode { label: "Germany (+49)", value: "49" },
    CountryCode { label: "France (+33)", value: "33" },
    CountryCode { label: "Japan (+81)", value: "81" },
    CountryCode { label: "China (+86)", value: "86" },
];

/// Returns the country code following `current` in [`COUNTRY_CODES`], wrapping around.
/// Unknown codes restart at the first entry.
pub fn next_country_code(current: &str) -> &'static str {
    match COUNTRY_CODES.iter().position(|c| c.value == current) {
        Some(idx) => COUNTRY_CODES[(idx + 1) % COUNTRY_CODES.len()].value,
        None => COUNTRY_CODES[0].value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn mode_ids_roundtrip_through_strum() {
        for mode in Mode::iter() {
            assert_eq!(Mode::from_str(&mode.to_string()).unwrap(), mode);
        }
        assert_eq!(Mode::Linkedin.to_string(), "linkedin");
    }

    #[test]
    fn required_field_is_listed_for_every_mode() {
        for mode in Mode::iter() {
            assert!(mode.fields().contains(&mode.required_field()));
            assert_eq!(mode.fields().last(), Some(&Field::CustomMessage));
        }
    }

    #[test]
    fn mode_cycling_wraps() {
        assert_eq!(Mode::Email.next(), Mode::Whatsapp);
        assert_eq!(Mode::Whatsapp.previous(), Mode::Email);
    }

    #[test]
    fn country_code_cycling() {
        assert_eq!(next_country_code("91"), "1");
        assert_eq!(next_country_code("86"), "91");
        assert_eq!(next_country_code("999"), "91");
    }
}
