// File: ./src/platform/desktop.rs
//! Capability implementations for a desktop host (Linux/macOS/Windows).
//!
//! - QR captures are rendered with `qrcode` into a PNG in the cache directory,
//!   with the custom message above the symbol and the caption below it.
//! - The clipboard is the OS clipboard, through `arboard`.
//! - Gallery assets are copied into `<Pictures>/<album>/`.
//! - Static images are decoded with `rqrr`.
//! - There is no camera driver: the frontend feeds decoded frames to the
//!   scanner itself while the [`DesktopCamera`] session is active.
use crate::context::AppContext;
use crate::model::{CaptureTarget, is_openable};
use crate::platform::{
    Asset, Camera, Clipboard, DecodedCode, FileStore, Gallery, ImagePicker, Platform, ShareSheet,
    StaticDecoder, UrlOpener, ViewCapture,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{GrayImage, Luma, imageops};
use qrcode::QrCode;
use qrcode::render::unicode;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// The OS clipboard. Each call opens its own `arboard` handle on a blocking thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

#[cfg(not(any(target_os = "android", target_os = "ios")))]
#[async_trait]
impl Clipboard for SystemClipboard {
    async fn read_text(&self) -> Result<String> {
        tokio::task::spawn_blocking(|| {
            let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
            match clipboard.get_text() {
                Ok(text) => Ok(text),
                Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
                Err(e) => Err(anyhow::anyhow!("Failed to read clipboard: {}", e)),
            }
        })
        .await
        .context("Clipboard task panicked")?
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new().context("Failed to access clipboard")?;
            clipboard
                .set_text(text)
                .context("Failed to write clipboard")
        })
        .await
        .context("Clipboard task panicked")?
    }
}

// Mobile hosts supply their own clipboard through the bindings.
#[cfg(any(target_os = "android", target_os = "ios"))]
#[async_trait]
impl Clipboard for SystemClipboard {
    async fn read_text(&self) -> Result<String> {
        anyhow::bail!("No system clipboard on this target")
    }

    async fn write_text(&self, _text: &str) -> Result<()> {
        anyhow::bail!("No system clipboard on this target")
    }
}

/// Renders the QR symbol to `<cache>/capture_<uuid>.png`.
#[derive(Debug)]
pub struct PngCapture {
    ctx: Arc<dyn AppContext>,
    module_pixels: u32,
}

impl PngCapture {
    pub fn new(ctx: Arc<dyn AppContext>, module_pixels: u32) -> Self {
        Self {
            ctx,
            module_pixels: module_pixels.max(1),
        }
    }
}

/// Encodes `data` as a greyscale QR image with square modules of `module_pixels`.
pub fn render_qr_image(data: &str, module_pixels: u32) -> Result<GrayImage> {
    let code = QrCode::new(data.as_bytes()).context("Failed to encode QR code")?;
    Ok(code
        .render::<Luma<u8>>()
        .module_dimensions(module_pixels, module_pixels)
        .quiet_zone(true)
        .build())
}

pub fn render_qr_png(data: &str, module_pixels: u32, path: &Path) -> Result<()> {
    render_qr_image(data, module_pixels)?
        .save(path)
        .with_context(|| format!("Failed to write image {:?}", path))?;
    Ok(())
}

const GLYPH_SIZE: u32 = 8;

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_SIZE * scale
}

/// Draws `text` in black with its top-left corner at `(x, y)`. Pixels outside
/// the canvas are dropped.
fn draw_text(canvas: &mut GrayImage, text: &str, x: u32, y: u32, scale: u32) {
    for (i, c) in text.chars().enumerate() {
        let left = x + i as u32 * GLYPH_SIZE * scale;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in (0..GLYPH_SIZE).filter(|&col| bits & (1u8 << col) != 0) {
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px = left + col * scale + dx;
                        let py = y + row as u32 * scale + dy;
                        if px < canvas.width() && py < canvas.height() {
                            canvas.put_pixel(px, py, Luma([0]));
                        }
                    }
                }
            }
        }
    }
}

/// Lays out a capture: the custom message in a band above the symbol and the
/// caption in a band below it. The canvas widens to fit long text.
pub fn compose_capture(
    symbol: &GrayImage,
    message: Option<&str>,
    caption: Option<&str>,
    scale: u32,
) -> GrayImage {
    let pad = GLYPH_SIZE * scale / 2;
    let band = GLYPH_SIZE * scale + 2 * pad;
    let widest = [message, caption]
        .into_iter()
        .flatten()
        .map(|text| text_width(text, scale) + 2 * pad)
        .max()
        .unwrap_or(0);
    let width = symbol.width().max(widest);
    let top = if message.is_some() { band } else { 0 };
    let bottom = if caption.is_some() { band } else { 0 };

    let mut canvas = GrayImage::from_pixel(width, top + symbol.height() + bottom, Luma([255]));
    imageops::overlay(
        &mut canvas,
        symbol,
        i64::from((width - symbol.width()) / 2),
        i64::from(top),
    );
    if let Some(text) = message {
        draw_text(&mut canvas, text, (width - text_width(text, scale)) / 2, pad, scale);
    }
    if let Some(text) = caption {
        let y = top + symbol.height() + pad;
        draw_text(&mut canvas, text, (width - text_width(text, scale)) / 2, y, scale);
    }
    canvas
}

/// Renders the full capture (symbol plus labels) to `path`.
pub fn render_capture_png(target: &CaptureTarget, module_pixels: u32, path: &Path) -> Result<()> {
    let symbol = render_qr_image(&target.qr_value, module_pixels)?;
    let scale = (module_pixels / 2).max(1);
    compose_capture(
        &symbol,
        target.custom_message.as_deref(),
        target.caption.as_deref(),
        scale,
    )
    .save(path)
    .with_context(|| format!("Failed to write image {:?}", path))?;
    Ok(())
}

/// Block-character rendering for terminals, inverted for dark backgrounds.
pub fn render_qr_text(data: &str) -> Result<String> {
    let code = QrCode::new(data.as_bytes()).context("Failed to encode QR code")?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

#[async_trait]
impl ViewCapture for PngCapture {
    async fn capture(&self, target: &CaptureTarget) -> Result<PathBuf> {
        let path = self
            .ctx
            .get_cache_dir()?
            .join(format!("capture_{}.png", Uuid::new_v4()));

        let target = target.clone();
        let px = self.module_pixels;
        let out = path.clone();
        tokio::task::spawn_blocking(move || render_capture_png(&target, px, &out))
            .await
            .context("Capture task panicked")??;

        Ok(path)
    }
}

#[derive(Debug, Default)]
pub struct LocalFiles;

#[async_trait]
impl FileStore for LocalFiles {
    async fn copy_file(&self, from: &Path, to: &Path) -> Result<()> {
        if let Some(parent) = to.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        tokio::fs::copy(from, to)
            .await
            .with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;
        Ok(())
    }
}

/// Desktop "share": the file is left in place for the frontend to point the user at.
#[derive(Debug, Default)]
pub struct RevealShare;

#[async_trait]
impl ShareSheet for RevealShare {
    async fn share(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            anyhow::bail!("File does not exist: {}", path.display());
        }
        log::info!("Ready to share: {}", path.display());
        Ok(())
    }
}

/// Stores assets as plain files under the user's pictures directory.
#[derive(Debug)]
pub struct FolderGallery {
    ctx: Arc<dyn AppContext>,
}

impl FolderGallery {
    pub fn new(ctx: Arc<dyn AppContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Gallery for FolderGallery {
    async fn request_write_permission(&self) -> Result<bool> {
        Ok(true)
    }

    async fn create_asset(&self, path: &Path) -> Result<Asset> {
        let id = Uuid::new_v4().to_string();
        let dest = self.ctx.get_pictures_dir()?.join(format!("socialqr_{}.png", id));
        tokio::fs::copy(path, &dest)
            .await
            .with_context(|| format!("Failed to store asset {:?}", dest))?;
        Ok(Asset {
            id,
            uri: dest.to_string_lossy().to_string(),
        })
    }

    async fn add_to_album(&self, album: &str, asset: &Asset) -> Result<()> {
        let album_dir = self.ctx.get_pictures_dir()?.join(album);
        tokio::fs::create_dir_all(&album_dir)
            .await
            .with_context(|| format!("Failed to create album {:?}", album_dir))?;
        let src = PathBuf::from(&asset.uri);
        let name = src
            .file_name()
            .ok_or_else(|| anyhow::anyhow!("Asset has no file name: {}", asset.uri))?;
        tokio::fs::rename(&src, album_dir.join(name))
            .await
            .with_context(|| format!("Failed to move asset into album '{}'", album))?;
        Ok(())
    }
}

/// Camera session flag. Desktop hosts have no capture driver, so permission is
/// implicit and decoded frames are pushed by the frontend.
#[derive(Debug, Default)]
pub struct DesktopCamera {
    active: AtomicBool,
}

impl DesktopCamera {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Camera for DesktopCamera {
    async fn has_permission(&self) -> Result<bool> {
        Ok(true)
    }

    async fn request_permission(&self) -> Result<bool> {
        Ok(true)
    }

    async fn activate(&self) -> Result<()> {
        self.active.store(true, Ordering::SeqCst);
        log::debug!("Camera session started");
        Ok(())
    }

    async fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
        log::debug!("Camera session stopped");
    }
}

/// Picker whose next answer is chosen by the frontend (a typed path).
#[derive(Debug, Default)]
pub struct PresetPicker {
    next: Mutex<Option<PathBuf>>,
}

impl PresetPicker {
    pub fn set_next(&self, path: Option<PathBuf>) {
        if let Ok(mut guard) = self.next.lock() {
            *guard = path;
        }
    }
}

#[async_trait]
impl ImagePicker for PresetPicker {
    async fn pick_image(&self) -> Result<Option<PathBuf>> {
        let picked = self
            .next
            .lock()
            .map_err(|_| anyhow::anyhow!("Picker lock poisoned"))?
            .take();
        Ok(picked)
    }
}

#[derive(Debug, Default)]
pub struct RqrrDecoder;

/// Decodes every QR grid found in the image at `path`.
pub fn decode_image_file(path: &Path) -> Result<Vec<DecodedCode>> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image {:?}", path))?
        .to_luma8();
    let (w, h) = img.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
        img.get_pixel(x as u32, y as u32).0[0]
    });

    let mut codes = Vec::new();
    for grid in prepared.detect_grids() {
        match grid.decode() {
            Ok((_meta, data)) => codes.push(DecodedCode { data }),
            Err(e) => log::debug!("Skipping undecodable grid: {}", e),
        }
    }
    Ok(codes)
}

#[async_trait]
impl StaticDecoder for RqrrDecoder {
    async fn decode_from_image_path(&self, path: &Path) -> Result<Vec<DecodedCode>> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || decode_image_file(&path))
            .await
            .context("Decode task panicked")?
    }
}

/// Hands links to the desktop's default handler.
#[derive(Debug, Default)]
pub struct SystemUrlOpener;

#[async_trait]
impl UrlOpener for SystemUrlOpener {
    async fn can_open(&self, url: &str) -> Result<bool> {
        Ok(is_openable(url))
    }

    async fn open(&self, url: &str) -> Result<()> {
        // Bare `www.` links have no scheme for the handler to dispatch on.
        let target = if url.starts_with("www.") {
            format!("https://{}", url)
        } else {
            url.to_string()
        };

        #[cfg(target_os = "macos")]
        let mut cmd = tokio::process::Command::new("open");
        #[cfg(target_os = "windows")]
        let mut cmd = {
            let mut c = tokio::process::Command::new("cmd");
            c.args(["/C", "start", ""]);
            c
        };
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let mut cmd = tokio::process::Command::new("xdg-open");

        log::info!("Opening {}", target);
        cmd.arg(&target)
            .spawn()
            .with_context(|| format!("Failed to launch handler for {}", target))?;
        Ok(())
    }
}

/// Concrete desktop capability set, with typed handles the frontend needs.
#[derive(Clone)]
pub struct DesktopPlatform {
    pub camera: Arc<DesktopCamera>,
    pub picker: Arc<PresetPicker>,
    platform: Platform,
}

impl DesktopPlatform {
    pub fn new(ctx: Arc<dyn AppContext>, module_pixels: u32) -> Self {
        Self::with_clipboard(ctx, module_pixels, Arc::new(SystemClipboard))
    }

    /// Same as [`DesktopPlatform::new`] but with a caller-supplied clipboard.
    pub fn with_clipboard(
        ctx: Arc<dyn AppContext>,
        module_pixels: u32,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        let camera = Arc::new(DesktopCamera::default());
        let picker = Arc::new(PresetPicker::default());

        let platform = Platform {
            clipboard,
            capture: Arc::new(PngCapture::new(ctx.clone(), module_pixels)),
            files: Arc::new(LocalFiles),
            share: Arc::new(RevealShare),
            gallery: Arc::new(FolderGallery::new(ctx)),
            camera: camera.clone(),
            picker: picker.clone(),
            decoder: Some(Arc::new(RqrrDecoder)),
            urls: Arc::new(SystemUrlOpener),
        };

        Self {
            camera,
            picker,
            platform,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform.clone()
    }
}
