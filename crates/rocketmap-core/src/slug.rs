use crate::paths;
use std::path::Path;

/// Turn a free-form canvas title into a slug: lowercase, runs of
/// non-alphanumeric characters collapse to single hyphens, trimmed,
/// truncated to 64 chars. Falls back to "canvas" when nothing usable
/// remains.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_hyphen = true; // suppress a leading hyphen
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_hyphen = false;
        } else if !last_hyphen {
            out.push('-');
            last_hyphen = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out.truncate(64);
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("canvas");
    }
    out
}

/// Derive a slug for `title` that does not collide with any existing
/// canvas under `root`. Linear probe: `base`, `base-2`, `base-3`, ...
///
/// If the canvas collection directory does not exist yet there is nothing
/// to collide with, so the base slug is returned without probing.
pub fn unique_slug(root: &Path, title: &str) -> String {
    let base = slugify(title);
    if !paths::canvases_dir(root).is_dir() {
        return base;
    }
    if !paths::canvas_dir(root, &base).exists() {
        return base;
    }
    let mut n = 2u32;
    loop {
        let candidate = format!("{base}-{n}");
        if !paths::canvas_dir(root, &candidate).exists() {
            return candidate;
        }
        n += 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
