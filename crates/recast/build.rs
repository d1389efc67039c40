// Build scripts signal errors by panicking; there is no caller to
// return Result to.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Build script for the recast binary crate.
//!
//! Copies the stylesheet from `site/` at the workspace root into
//! `OUT_DIR` so that `main.rs` can `include_str!` it via a stable
//! environment variable path instead of a `../../` relative path.

use std::path::{Path, PathBuf};
use std::{env, fs};

/// Shared asset files that live in `site/` at the workspace root.
const SITE_ASSETS: &[(&str, &str)] = &[("theme.css", "THEME_CSS_PATH")];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());

    // Assumes the crate lives at `<workspace>/crates/recast/`.
    let workspace_root = manifest_dir
        .parent()
        .and_then(Path::parent)
        .expect("could not find workspace root");

    copy_site_assets(&workspace_root.join("site"), &out_dir);
}

/// Copy site assets into `OUT_DIR` and expose their paths as cargo
/// environment variables.
fn copy_site_assets(site_dir: &Path, out_dir: &Path) {
    for &(filename, env_key) in SITE_ASSETS {
        let src = site_dir.join(filename);
        let dst = out_dir.join(filename);

        println!("cargo:rerun-if-changed={}", src.display());
        fs::copy(&src, &dst).unwrap_or_else(|e| {
            panic!("failed to copy {} to {}: {e}", src.display(), dst.display())
        });
        println!("cargo:rustc-env={env_key}={}", dst.display());
    }
}
