// Social screen: mode switching, validation, share and gallery sequencing.
mod common;

use common::{Faults, Mocks};
use socialqr::config::Config;
use socialqr::context::{AppContext, TestContext};
use socialqr::controller::SocialController;
use socialqr::error::{AppError, NoticeAction};
use socialqr::model::{Field, Mode};
use std::sync::Arc;

fn controller(mocks: &Mocks, ctx: TestContext) -> (SocialController, Arc<TestContext>) {
    let ctx = Arc::new(ctx);
    let social = SocialController::new(ctx.clone(), mocks.platform(), &Config::default());
    (social, ctx)
}

fn generated(mocks: &Mocks) -> (SocialController, Arc<TestContext>) {
    let (mut social, ctx) = controller(mocks, TestContext::new());
    social.switch_mode(Mode::Instagram);
    social.update_field(Field::InstagramUsername, "@rustlang");
    social.update_field(Field::CustomMessage, "Follow us");
    social.generate().unwrap();
    (social, ctx)
}

#[test]
fn test_defaults_come_from_config() {
    let mocks = Mocks::new();
    let mut cfg = Config::default();
    cfg.default_mode = Mode::Email;
    cfg.default_country_code = "44".to_string();
    let social = SocialController::new(Arc::new(TestContext::new()), mocks.platform(), &cfg);
    assert_eq!(social.mode(), Mode::Email);
    assert_eq!(social.field(Field::CountryCode), "44");
    assert_eq!(social.qr_value(), None);
}

#[test]
fn test_switching_mode_clears_the_value_but_keeps_inputs() {
    let mocks = Mocks::new();
    let (mut social, _ctx) = generated(&mocks);
    assert_eq!(social.qr_value(), Some("https://instagram.com/rustlang"));

    social.switch_mode(Mode::Github);
    assert_eq!(social.qr_value(), None);
    assert_eq!(social.field(Field::InstagramUsername), "@rustlang");

    social.switch_mode(Mode::Instagram);
    assert_eq!(social.qr_value(), None, "switching back does not restore the value");
}

#[test]
fn test_failed_validation_keeps_previous_value() {
    let mocks = Mocks::new();
    let (mut social, _ctx) = generated(&mocks);

    social.update_field(Field::InstagramUsername, "  ");
    let err = social.generate().unwrap_err();
    assert_eq!(err.title(), "Username Required");
    assert_eq!(social.qr_value(), Some("https://instagram.com/rustlang"));
}

#[test]
fn test_editing_a_field_does_not_regenerate() {
    let mocks = Mocks::new();
    let (mut social, _ctx) = generated(&mocks);
    social.update_field(Field::InstagramUsername, "someone_else");
    assert_eq!(social.qr_value(), Some("https://instagram.com/rustlang"));
    social.generate().unwrap();
    assert_eq!(social.qr_value(), Some("https://instagram.com/someone_else"));
}

#[test]
fn test_generate_raises_ui_hints_once() {
    let mocks = Mocks::new();
    let (mut social, _ctx) = generated(&mocks);
    let hints = social.take_ui_hints();
    assert!(hints.scroll_to_result);
    assert!(hints.dismiss_keyboard);
    assert!(!social.take_ui_hints().scroll_to_result);
}

#[test]
fn test_capture_target_carries_label_and_message() {
    let mocks = Mocks::new();
    let (social, _ctx) = generated(&mocks);
    let target = social.capture_target().unwrap();
    assert_eq!(target.qr_value, "https://instagram.com/rustlang");
    assert_eq!(target.custom_message.as_deref(), Some("Follow us"));
    assert_eq!(target.caption.as_deref(), Some("IG: @rustlang"));
}

#[tokio::test]
async fn test_share_goes_capture_copy_share_into_documents() {
    let mocks = Mocks::new();
    let (social, ctx) = generated(&mocks);

    let path = social.share_image().await.unwrap();
    let expected = ctx
        .get_documents_dir()
        .unwrap()
        .join("social_qrcode_with_number.png");
    assert_eq!(path, expected);
    assert_eq!(
        mocks.log.calls(),
        vec![
            "capture:https://instagram.com/rustlang".to_string(),
            format!("copy:{}", expected.display()),
            format!("share:{}", expected.display()),
        ]
    );
}

#[tokio::test]
async fn test_share_falls_back_to_cache_without_documents() {
    let mocks = Mocks::new();
    let (mut social, ctx) = controller(&mocks, TestContext::without_documents());
    social.update_field(Field::PhoneNumber, "9876543210");
    social.generate().unwrap();

    let path = social.share_image().await.unwrap();
    assert_eq!(
        path,
        ctx.get_cache_dir().unwrap().join("social_qrcode_with_number.png")
    );
}

#[tokio::test]
async fn test_share_failures_map_to_messages() {
    let mocks = Mocks::new();
    let (social, _ctx) = generated(&mocks);

    Faults::set(&mocks.faults.capture_fails);
    let err = social.share_image().await.unwrap_err();
    assert_eq!(err.title(), "Error");
    assert_eq!(err.to_string(), "Failed to share image: view not mounted");
    assert!(!mocks.log.contains("share:"));

    let mocks = Mocks::new();
    let (social, _ctx) = generated(&mocks);
    Faults::set(&mocks.faults.share_fails);
    let err = social.share_image().await.unwrap_err();
    assert_eq!(err.to_string(), "Sharing failed: no share targets");
}

#[tokio::test]
async fn test_export_without_value_is_a_precondition() {
    let mocks = Mocks::new();
    let (social, _ctx) = controller(&mocks, TestContext::new());
    assert!(matches!(
        social.share_image().await,
        Err(AppError::Precondition(_))
    ));
    assert!(matches!(
        social.save_to_gallery().await,
        Err(AppError::Precondition(_))
    ));
    assert!(mocks.log.calls().is_empty());
}

#[tokio::test]
async fn test_gallery_save_sequence() {
    let mocks = Mocks::new();
    let (social, ctx) = generated(&mocks);

    let notice = social.save_to_gallery().await.unwrap();
    assert_eq!(notice.title, "Success");
    assert_eq!(notice.message, "QR Code saved to Gallery!");

    let file = ctx.get_cache_dir().unwrap().join("social_qr_code.png");
    assert_eq!(
        mocks.log.calls(),
        vec![
            "gallery.permission".to_string(),
            "capture:https://instagram.com/rustlang".to_string(),
            format!("copy:{}", file.display()),
            format!("gallery.create:{}", file.display()),
            "gallery.album:SocialQR:asset-1".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_gallery_permission_denied_captures_nothing() {
    let mocks = Mocks::new();
    let (social, _ctx) = generated(&mocks);
    Faults::set(&mocks.faults.gallery_denied);

    let err = social.save_to_gallery().await.unwrap_err();
    assert!(matches!(err, AppError::Permission { .. }));
    assert_eq!(err.title(), "Permission Required");
    assert_eq!(mocks.log.calls(), vec!["gallery.permission".to_string()]);
}

#[tokio::test]
async fn test_gallery_unavailable_offers_share_instead() {
    let mocks = Mocks::new();
    let (social, _ctx) = generated(&mocks);
    Faults::set(&mocks.faults.gallery_unavailable);

    let err = social.save_to_gallery().await.unwrap_err();
    let notice = err.to_notice();
    assert_eq!(notice.title, "Configuration Error");
    assert!(notice.actions.contains(&NoticeAction::ShareInstead));
    assert!(mocks.log.calls().is_empty());
}

#[tokio::test]
async fn test_album_failure_is_swallowed() {
    let mocks = Mocks::new();
    let (social, _ctx) = generated(&mocks);
    Faults::set(&mocks.faults.album_fails);

    let notice = social.save_to_gallery().await.unwrap();
    assert_eq!(notice.message, "QR Code saved to Gallery!");
    assert!(mocks.log.contains("gallery.album:"));
}

#[tokio::test]
async fn test_gallery_copy_failure_is_a_save_error() {
    let mocks = Mocks::new();
    let (social, _ctx) = generated(&mocks);
    Faults::set(&mocks.faults.copy_fails);

    let err = social.save_to_gallery().await.unwrap_err();
    assert_eq!(err.title(), "Save Error");
    assert_eq!(err.to_string(), "disk full");
    assert!(!mocks.log.contains("gallery.create"));
}
