// Shared mock capabilities for controller tests. Every mock appends to one call log
// so tests can assert on side-effect ordering.
#![allow(dead_code)]

use anyhow::{Result, bail};
use async_trait::async_trait;
use socialqr::model::CaptureTarget;
use socialqr::platform::{
    Asset, Camera, Clipboard, DecodedCode, FileStore, Gallery, ImagePicker, Platform, ShareSheet,
    StaticDecoder, UrlOpener, ViewCapture,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.calls().iter().any(|c| c.starts_with(prefix))
    }
}

/// Switches that make individual capabilities fail or refuse.
#[derive(Default)]
pub struct Faults {
    pub capture_fails: AtomicBool,
    pub copy_fails: AtomicBool,
    pub share_fails: AtomicBool,
    pub gallery_unavailable: AtomicBool,
    pub gallery_denied: AtomicBool,
    pub album_fails: AtomicBool,
    pub camera_denied: AtomicBool,
    pub camera_grant_on_request: AtomicBool,
    pub camera_activate_fails: AtomicBool,
    pub cannot_open: AtomicBool,
    pub can_open_fails: AtomicBool,
    pub open_fails: AtomicBool,
}

impl Faults {
    pub fn set(flag: &AtomicBool) {
        flag.store(true, Ordering::SeqCst);
    }
}

fn on(flag: &AtomicBool) -> bool {
    flag.load(Ordering::SeqCst)
}

pub struct Mocks {
    pub log: CallLog,
    pub faults: Arc<Faults>,
    pub clipboard: Arc<MockClipboard>,
    pub picker: Arc<MockPicker>,
    pub decoder: Arc<MockDecoder>,
}

impl Mocks {
    pub fn new() -> Self {
        let log = CallLog::default();
        Self {
            clipboard: Arc::new(MockClipboard {
                log: log.clone(),
                text: Mutex::new(String::new()),
            }),
            picker: Arc::new(MockPicker {
                log: log.clone(),
                next: Mutex::new(None),
            }),
            decoder: Arc::new(MockDecoder {
                log: log.clone(),
                codes: Mutex::new(Vec::new()),
            }),
            faults: Arc::new(Faults::default()),
            log,
        }
    }

    pub fn platform(&self) -> Platform {
        self.build(true)
    }

    pub fn platform_without_decoder(&self) -> Platform {
        self.build(false)
    }

    fn build(&self, with_decoder: bool) -> Platform {
        let common = Shared {
            log: self.log.clone(),
            faults: self.faults.clone(),
        };
        Platform {
            clipboard: self.clipboard.clone(),
            capture: Arc::new(MockCapture(common.clone())),
            files: Arc::new(MockFiles(common.clone())),
            share: Arc::new(MockShare(common.clone())),
            gallery: Arc::new(MockGallery(common.clone())),
            camera: Arc::new(MockCamera {
                shared: common.clone(),
                granted: AtomicBool::new(false),
            }),
            picker: self.picker.clone(),
            decoder: with_decoder.then(|| self.decoder.clone() as Arc<dyn StaticDecoder>),
            urls: Arc::new(MockUrls(common)),
        }
    }
}

#[derive(Clone)]
struct Shared {
    log: CallLog,
    faults: Arc<Faults>,
}

pub struct MockClipboard {
    log: CallLog,
    pub text: Mutex<String>,
}

#[async_trait]
impl Clipboard for MockClipboard {
    async fn read_text(&self) -> Result<String> {
        self.log.push("clipboard.read");
        Ok(self.text.lock().unwrap().clone())
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        self.log.push(format!("clipboard.write:{}", text));
        *self.text.lock().unwrap() = text.to_string();
        Ok(())
    }
}

struct MockCapture(Shared);

#[async_trait]
impl ViewCapture for MockCapture {
    async fn capture(&self, target: &CaptureTarget) -> Result<PathBuf> {
        self.0.log.push(format!("capture:{}", target.qr_value));
        if on(&self.0.faults.capture_fails) {
            bail!("view not mounted");
        }
        Ok(PathBuf::from("/tmp/capture.png"))
    }
}

struct MockFiles(Shared);

#[async_trait]
impl FileStore for MockFiles {
    async fn copy_file(&self, _from: &Path, to: &Path) -> Result<()> {
        self.0.log.push(format!("copy:{}", to.display()));
        if on(&self.0.faults.copy_fails) {
            bail!("disk full");
        }
        Ok(())
    }
}

struct MockShare(Shared);

#[async_trait]
impl ShareSheet for MockShare {
    async fn share(&self, path: &Path) -> Result<()> {
        self.0.log.push(format!("share:{}", path.display()));
        if on(&self.0.faults.share_fails) {
            bail!("no share targets");
        }
        Ok(())
    }
}

struct MockGallery(Shared);

#[async_trait]
impl Gallery for MockGallery {
    fn is_available(&self) -> bool {
        !on(&self.0.faults.gallery_unavailable)
    }

    async fn request_write_permission(&self) -> Result<bool> {
        self.0.log.push("gallery.permission");
        Ok(!on(&self.0.faults.gallery_denied))
    }

    async fn create_asset(&self, path: &Path) -> Result<Asset> {
        self.0.log.push(format!("gallery.create:{}", path.display()));
        Ok(Asset {
            id: "asset-1".into(),
            uri: format!("file://{}", path.display()),
        })
    }

    async fn add_to_album(&self, album: &str, asset: &Asset) -> Result<()> {
        self.0.log.push(format!("gallery.album:{}:{}", album, asset.id));
        if on(&self.0.faults.album_fails) {
            bail!("album exists");
        }
        Ok(())
    }
}

/// Permission starts denied when `camera_denied` is set; a granted request
/// sticks for later checks.
struct MockCamera {
    shared: Shared,
    granted: AtomicBool,
}

#[async_trait]
impl Camera for MockCamera {
    async fn has_permission(&self) -> Result<bool> {
        Ok(!on(&self.shared.faults.camera_denied) || on(&self.granted))
    }

    async fn request_permission(&self) -> Result<bool> {
        self.shared.log.push("camera.request");
        let granted = on(&self.shared.faults.camera_grant_on_request);
        if granted {
            Faults::set(&self.granted);
        }
        Ok(granted)
    }

    async fn activate(&self) -> Result<()> {
        self.shared.log.push("camera.activate");
        if on(&self.shared.faults.camera_activate_fails) {
            bail!("camera in use");
        }
        Ok(())
    }

    async fn deactivate(&self) {
        self.shared.log.push("camera.deactivate");
    }
}

pub struct MockPicker {
    log: CallLog,
    pub next: Mutex<Option<PathBuf>>,
}

impl MockPicker {
    pub fn will_pick(&self, path: &str) {
        *self.next.lock().unwrap() = Some(PathBuf::from(path));
    }
}

#[async_trait]
impl ImagePicker for MockPicker {
    async fn pick_image(&self) -> Result<Option<PathBuf>> {
        self.log.push("picker.pick");
        Ok(self.next.lock().unwrap().take())
    }
}

pub struct MockDecoder {
    log: CallLog,
    pub codes: Mutex<Vec<String>>,
}

impl MockDecoder {
    pub fn will_find(&self, codes: &[&str]) {
        *self.codes.lock().unwrap() = codes.iter().map(|c| c.to_string()).collect();
    }
}

#[async_trait]
impl StaticDecoder for MockDecoder {
    async fn decode_from_image_path(&self, path: &Path) -> Result<Vec<DecodedCode>> {
        self.log.push(format!("decode:{}", path.display()));
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .map(|d| DecodedCode { data: d.clone() })
            .collect())
    }
}

struct MockUrls(Shared);

#[async_trait]
impl UrlOpener for MockUrls {
    async fn can_open(&self, url: &str) -> Result<bool> {
        self.0.log.push(format!("urls.can_open:{}", url));
        if on(&self.0.faults.can_open_fails) {
            bail!("query failed");
        }
        Ok(!on(&self.0.faults.cannot_open))
    }

    async fn open(&self, url: &str) -> Result<()> {
        self.0.log.push(format!("urls.open:{}", url));
        if on(&self.0.faults.open_fails) {
            bail!("activity not found");
        }
        Ok(())
    }
}
