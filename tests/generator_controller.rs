// Free-text generator: paste, generate and share.
mod common;

use common::{Faults, Mocks};
use socialqr::context::{AppContext, TestContext};
use socialqr::controller::GeneratorController;
use socialqr::error::AppError;
use std::sync::Arc;

fn controller(mocks: &Mocks) -> (GeneratorController, Arc<TestContext>) {
    let ctx = Arc::new(TestContext::new());
    (GeneratorController::new(ctx.clone(), mocks.platform()), ctx)
}

#[tokio::test]
async fn test_paste_replaces_content() {
    let mocks = Mocks::new();
    let (mut generator, _ctx) = controller(&mocks);
    generator.set_content("old");
    *mocks.clipboard.text.lock().unwrap() = "https://example.com/page".to_string();

    assert!(generator.paste().await.unwrap());
    assert_eq!(generator.content(), "https://example.com/page");
    assert_eq!(generator.qr_value(), None, "pasting does not generate");
}

#[tokio::test]
async fn test_empty_clipboard_leaves_content() {
    let mocks = Mocks::new();
    let (mut generator, _ctx) = controller(&mocks);
    generator.set_content("keep me");

    assert!(!generator.paste().await.unwrap());
    assert_eq!(generator.content(), "keep me");
}

#[test]
fn test_generate_keeps_content_verbatim() {
    let mocks = Mocks::new();
    let (mut generator, _ctx) = controller(&mocks);
    generator.set_content("  WIFI:S:home;T:WPA;P:secret;;  ");
    let value = generator.generate().unwrap();
    assert_eq!(value, "  WIFI:S:home;T:WPA;P:secret;;  ");
    assert_eq!(generator.qr_value(), Some(value.as_str()));
    assert!(generator.take_ui_hints().scroll_to_result);
}

#[test]
fn test_blank_content_is_rejected() {
    let mocks = Mocks::new();
    let (mut generator, _ctx) = controller(&mocks);
    generator.set_content("first");
    generator.generate().unwrap();

    generator.set_content(" \n ");
    let err = generator.generate().unwrap_err();
    assert_eq!(err.title(), "Input Required");
    assert_eq!(
        err.to_string(),
        "Please enter some text or a URL to generate a QR code."
    );
    assert_eq!(generator.qr_value(), Some("first"));
    assert!(!generator.take_ui_hints().scroll_to_result);
}

#[tokio::test]
async fn test_share_writes_generator_file() {
    let mocks = Mocks::new();
    let (mut generator, ctx) = controller(&mocks);
    generator.set_content("hello");
    generator.set_custom_message("Scan me");
    generator.generate().unwrap();

    let path = generator.share_image().await.unwrap();
    assert_eq!(path, ctx.get_export_dir().unwrap().join("gen_qrcode.png"));
    assert_eq!(mocks.log.calls()[0], "capture:hello");
    assert!(mocks.log.contains("share:"));
}

#[tokio::test]
async fn test_share_failure_messages() {
    let mocks = Mocks::new();
    let (mut generator, _ctx) = controller(&mocks);
    generator.set_content("hello");
    generator.generate().unwrap();

    Faults::set(&mocks.faults.copy_fails);
    let err = generator.share_image().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to save/share image: disk full");
    assert!(!mocks.log.contains("share:"));
}

#[tokio::test]
async fn test_share_before_generate() {
    let mocks = Mocks::new();
    let (generator, _ctx) = controller(&mocks);
    assert!(matches!(
        generator.share_image().await,
        Err(AppError::Precondition(_))
    ));
}
