// File: ./src/context.rs
/*! Application context abstraction for filesystem paths.

This module provides an `AppContext` trait that encapsulates how the
application determines its config, cache, documents and pictures
directories. Two concrete implementations are provided:

- `StandardContext`: Uses `directories::ProjectDirs` / `UserDirs` and
  optionally an override root (useful for Android or the `--root` flag).
- `TestContext`: Creates a temporary directory for isolated tests and
  cleans it up when dropped.

Consumers must explicitly pass an `Arc<dyn AppContext>` or `&dyn AppContext`
to any code that performs filesystem IO.
*/

use anyhow::{Context, Result};
use directories::{ProjectDirs, UserDirs};
use std::path::PathBuf;

/// File the generator screen writes before sharing.
pub const GENERATOR_SHARE_FILE: &str = "gen_qrcode.png";
/// File the social screen writes before sharing.
pub const SOCIAL_SHARE_FILE: &str = "social_qrcode_with_number.png";
/// File the social screen writes before handing it to the gallery.
pub const SOCIAL_GALLERY_FILE: &str = "social_qr_code.png";

/// Defines the file system context for the application.
///
/// The trait is object-safe so callers can hold `Arc<dyn AppContext>`.
pub trait AppContext: Send + Sync + std::fmt::Debug {
    fn get_config_dir(&self) -> Result<PathBuf>;
    fn get_cache_dir(&self) -> Result<PathBuf>;
    fn get_pictures_dir(&self) -> Result<PathBuf>;

    /// App-private documents directory. Not every platform has one.
    fn get_documents_dir(&self) -> Option<PathBuf> {
        None
    }

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join("config.toml"))
    }

    fn get_log_path(&self) -> Result<PathBuf> {
        Ok(self.get_cache_dir()?.join("socialqr.log"))
    }

    /// Directory for share exports: documents when available, cache otherwise.
    fn get_export_dir(&self) -> Result<PathBuf> {
        match self.get_documents_dir() {
            Some(dir) => Ok(dir),
            None => self.get_cache_dir(),
        }
    }
}

fn ensure_exists(path: PathBuf) -> Result<PathBuf> {
    if !path.exists() {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory: {:?}", path))?;
    }
    Ok(path)
}

// --- Production Implementation ---

#[derive(Clone, Debug)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    /// Create a new StandardContext.
    ///
    /// When `override_root` is `Some(path)`, all directories will be created
    /// under that root using `config`, `cache`, `documents` and `pictures`
    /// subdirectories.
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }

    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "socialqr", "socialqr")
    }

    fn proj_dirs() -> Result<ProjectDirs> {
        Self::get_proj_dirs().ok_or_else(|| anyhow::anyhow!("No home directory"))
    }
}

impl AppContext for StandardContext {
    fn get_config_dir(&self) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return ensure_exists(root.join("config"));
        }
        ensure_exists(Self::proj_dirs()?.config_dir().to_path_buf())
    }

    fn get_cache_dir(&self) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return ensure_exists(root.join("cache"));
        }
        ensure_exists(Self::proj_dirs()?.cache_dir().to_path_buf())
    }

    fn get_pictures_dir(&self) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return ensure_exists(root.join("pictures"));
        }
        // Fall back to the app data dir on systems without an XDG pictures dir.
        let dir = match UserDirs::new().and_then(|u| u.picture_dir().map(|p| p.to_path_buf())) {
            Some(dir) => dir,
            None => Self::proj_dirs()?.data_dir().join("pictures"),
        };
        ensure_exists(dir)
    }

    fn get_documents_dir(&self) -> Option<PathBuf> {
        let dir = match &self.override_root {
            Some(root) => root.join("documents"),
            None => Self::get_proj_dirs()?.data_dir().to_path_buf(),
        };
        ensure_exists(dir).ok()
    }
}

// --- Test Implementation ---

#[derive(Clone, Debug)]
pub struct TestContext {
    pub root: PathBuf,
    /// When false the context behaves like a platform without a documents dir.
    pub with_documents: bool,
}

impl TestContext {
    /// Creates a new TestContext backed by a unique temporary directory.
    ///
    /// The directory is created immediately and removed when the `TestContext`
    /// is dropped.
    pub fn new() -> Self {
        let uuid = uuid::Uuid::new_v4();
        let root = std::env::temp_dir().join(format!("socialqr_test_{}", uuid));
        // Best-effort create; tests will panic if this fails.
        std::fs::create_dir_all(&root).expect("failed to create TestContext temp dir");
        Self {
            root,
            with_documents: true,
        }
    }

    pub fn without_documents() -> Self {
        let mut ctx = Self::new();
        ctx.with_documents = false;
        ctx
    }

    fn sub(&self, name: &str) -> Result<PathBuf> {
        let p = self.root.join(name);
        std::fs::create_dir_all(&p)?;
        Ok(p)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_config_dir(&self) -> Result<PathBuf> {
        self.sub("config")
    }

    fn get_cache_dir(&self) -> Result<PathBuf> {
        self.sub("cache")
    }

    fn get_pictures_dir(&self) -> Result<PathBuf> {
        self.sub("pictures")
    }

    fn get_documents_dir(&self) -> Option<PathBuf> {
        if self.with_documents {
            self.sub("documents").ok()
        } else {
            None
        }
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Best-effort cleanup; ignore errors.
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
