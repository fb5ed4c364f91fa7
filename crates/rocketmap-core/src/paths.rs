use crate::error::{Result, RocketMapError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const ROCKETMAP_DIR: &str = ".rocketmap";
pub const CANVASES_DIR: &str = ".rocketmap/canvases";

pub const CONFIG_FILE: &str = ".rocketmap/config.yaml";
pub const MANIFEST_FILE: &str = "manifest.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn rocketmap_dir(root: &Path) -> PathBuf {
    root.join(ROCKETMAP_DIR)
}

pub fn canvases_dir(root: &Path) -> PathBuf {
    root.join(CANVASES_DIR)
}

pub fn canvas_dir(root: &Path, slug: &str) -> PathBuf {
    root.join(CANVASES_DIR).join(slug)
}

pub fn canvas_manifest(root: &Path, slug: &str) -> PathBuf {
    canvas_dir(root, slug).join(MANIFEST_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(RocketMapError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
