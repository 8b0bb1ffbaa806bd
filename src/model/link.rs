// File: ./src/model/link.rs
//! Link construction for the social screen.
//!
//! `build_link` is a pure function of the active [`Mode`] and the current
//! [`FieldSet`]. Every input is trimmed before use; a blank required field
//! yields [`AppError::Validation`] and no link.
use crate::error::AppError;
use crate::model::fields::{Field, FieldSet};
use crate::model::mode::Mode;

const LINKEDIN_PROFILE_PREFIX: &str = "linkedin.com/in/";
const FACEBOOK_PROFILE_PREFIX: &str = "facebook.com/";

pub fn build_link(mode: Mode, fields: &FieldSet) -> Result<String, AppError> {
    validate(mode, fields)?;

    let link = match mode {
        Mode::Whatsapp => format!(
            "https://wa.me/{}{}",
            fields.trimmed(Field::CountryCode),
            clean_phone(fields.trimmed(Field::PhoneNumber))
        ),
        Mode::Instagram => format!(
            "https://instagram.com/{}",
            strip_handle(fields.trimmed(Field::InstagramUsername))
        ),
        Mode::Twitter => format!(
            "https://twitter.com/{}",
            strip_handle(fields.trimmed(Field::TwitterHandle))
        ),
        Mode::Linkedin => format!(
            "https://linkedin.com/in/{}",
            clean_linkedin_profile(fields.trimmed(Field::LinkedinProfile))
        ),
        Mode::Github => format!("https://github.com/{}", fields.trimmed(Field::GithubUsername)),
        Mode::Facebook => format!(
            "https://facebook.com/{}",
            clean_facebook_profile(fields.trimmed(Field::FacebookProfile))
        ),
        Mode::Email => mailto_link(
            fields.trimmed(Field::EmailAddress),
            fields.trimmed(Field::EmailSubject),
            fields.trimmed(Field::EmailBody),
        ),
    };

    Ok(link)
}

/// Checks the mode's required field without building anything.
pub fn validate(mode: Mode, fields: &FieldSet) -> Result<(), AppError> {
    if fields.is_blank(mode.required_field()) {
        let info = mode.info();
        return Err(AppError::Validation {
            title: info.missing_title,
            message: info.missing_message,
        });
    }
    Ok(())
}

/// Caption printed under the QR symbol in the shareable capture,
/// e.g. `WhatsApp: +91 9876543210`.
pub fn display_label(mode: Mode, fields: &FieldSet) -> String {
    match mode {
        Mode::Whatsapp => format!(
            "WhatsApp: +{} {}",
            fields.trimmed(Field::CountryCode),
            fields.trimmed(Field::PhoneNumber)
        ),
        Mode::Instagram => format!(
            "IG: @{}",
            strip_handle(fields.trimmed(Field::InstagramUsername))
        ),
        Mode::Twitter => format!("X: @{}", strip_handle(fields.trimmed(Field::TwitterHandle))),
        Mode::Linkedin => format!("LinkedIn: {}", fields.trimmed(Field::LinkedinProfile)),
        Mode::Github => format!("GitHub: {}", fields.trimmed(Field::GithubUsername)),
        Mode::Facebook => format!("FB: {}", fields.trimmed(Field::FacebookProfile)),
        Mode::Email => format!("Email: {}", fields.trimmed(Field::EmailAddress)),
    }
}

/// Keeps digits only, then drops leading zeros (a leading `+` is already gone
/// with the other non-digits).
pub fn clean_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.trim_start_matches('0').to_string()
}

pub fn strip_handle(handle: &str) -> &str {
    let handle = handle.trim();
    handle.strip_prefix('@').unwrap_or(handle)
}

pub fn clean_linkedin_profile(profile: &str) -> &str {
    strip_profile_url(profile.trim(), LINKEDIN_PROFILE_PREFIX)
}

pub fn clean_facebook_profile(profile: &str) -> &str {
    strip_profile_url(profile.trim(), FACEBOOK_PROFILE_PREFIX)
}

// Removes `http(s)://[www.]{prefix}` when the whole prefix is present, then one trailing `/`.
fn strip_profile_url<'a>(input: &'a str, prefix: &str) -> &'a str {
    let without_scheme = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"));

    let profile = without_scheme
        .and_then(|rest| rest.strip_prefix("www.").unwrap_or(rest).strip_prefix(prefix))
        .unwrap_or(input);

    profile.strip_suffix('/').unwrap_or(profile)
}

fn mailto_link(address: &str, subject: &str, body: &str) -> String {
    let mut params = Vec::new();
    if !subject.is_empty() {
        params.push(format!("subject={}", urlencoding::encode(subject)));
    }
    if !body.is_empty() {
        params.push(format!("body={}", urlencoding::encode(body)));
    }

    if params.is_empty() {
        format!("mailto:{}", address)
    } else {
        format!("mailto:{}?{}", address, params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields_with(field: Field, value: &str) -> FieldSet {
        let mut fields = FieldSet::default();
        fields.set(field, value);
        fields
    }

    #[test]
    fn phone_cleaning_keeps_digits_only() {
        assert_eq!(clean_phone("+0 98765-43210"), "9876543210");
        assert_eq!(clean_phone("(0044) 20 7946"), "44207946");
        assert_eq!(clean_phone("000"), "");
    }

    #[test]
    fn whatsapp_uses_country_code() {
        let mut fields = fields_with(Field::PhoneNumber, "  +0 98765-43210 ");
        assert_eq!(
            build_link(Mode::Whatsapp, &fields).unwrap(),
            "https://wa.me/919876543210"
        );
        fields.set(Field::CountryCode, "44");
        assert_eq!(
            build_link(Mode::Whatsapp, &fields).unwrap(),
            "https://wa.me/449876543210"
        );
    }

    #[test]
    fn handle_strips_only_leading_at() {
        assert_eq!(strip_handle("@abc"), "abc");
        assert_eq!(strip_handle(" abc "), "abc");
        assert_eq!(strip_handle("a@bc"), "a@bc");
    }

    #[test]
    fn linkedin_url_variants() {
        for input in [
            "john-doe-123",
            "https://linkedin.com/in/john-doe-123",
            "https://www.linkedin.com/in/john-doe-123/",
            "http://www.linkedin.com/in/john-doe-123",
            "john-doe-123/",
        ] {
            assert_eq!(clean_linkedin_profile(input), "john-doe-123", "input: {}", input);
        }
        // Unrelated hosts are left alone apart from the trailing slash.
        assert_eq!(
            clean_linkedin_profile("https://example.com/in/x/"),
            "https://example.com/in/x"
        );
    }

    #[test]
    fn facebook_url_variants() {
        assert_eq!(clean_facebook_profile("https://www.facebook.com/page.name/"), "page.name");
        assert_eq!(clean_facebook_profile("https://facebook.com/123"), "123");
        assert_eq!(clean_facebook_profile("page.name"), "page.name");
    }

    #[test]
    fn email_params_only_when_present() {
        let mut fields = fields_with(Field::EmailAddress, "a@b.com");
        assert_eq!(build_link(Mode::Email, &fields).unwrap(), "mailto:a@b.com");

        fields.set(Field::EmailBody, "See you at 5");
        assert_eq!(
            build_link(Mode::Email, &fields).unwrap(),
            "mailto:a@b.com?body=See%20you%20at%205"
        );

        fields.set(Field::EmailSubject, "Hi & bye");
        assert_eq!(
            build_link(Mode::Email, &fields).unwrap(),
            "mailto:a@b.com?subject=Hi%20%26%20bye&body=See%20you%20at%205"
        );
    }

    #[test]
    fn display_labels() {
        let fields = fields_with(Field::InstagramUsername, "@abc");
        assert_eq!(display_label(Mode::Instagram, &fields), "IG: @abc");
        let fields = fields_with(Field::PhoneNumber, "98765 43210");
        assert_eq!(display_label(Mode::Whatsapp, &fields), "WhatsApp: +91 98765 43210");
    }
}
