//! Links the N-API addon against libgoat.
//! `GOAT_LIB_DIR` wins; otherwise the root crate's target/{debug,release} is searched.
//! A directory only counts if it holds a libgoat artifact for the current target.

use std::env;
use std::path::{Path, PathBuf};

const LIB_DIR_ENV: &str = "GOAT_LIB_DIR";

fn main() {
    println!("cargo:rerun-if-env-changed={LIB_DIR_ENV}");

    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let artifacts = lib_artifact_names(&target_os);

    let Some(lib_dir) = search_dirs().into_iter().find(|dir| holds_any(dir, &artifacts)) else {
        panic!(
            "libgoat not found (looked for {}); build the root crate first or set {LIB_DIR_ENV}",
            artifacts.join(", ")
        );
    };

    println!("cargo:rerun-if-changed={}", lib_dir.display());
    println!("cargo:rustc-link-search=native={}", lib_dir.display());
    println!("cargo:rustc-link-lib=goat");
}

fn search_dirs() -> Vec<PathBuf> {
    if let Some(dir) = env::var_os(LIB_DIR_ENV) {
        return vec![PathBuf::from(dir)];
    }
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    // bindings/node/native -> repo root
    let Some(repo_root) = manifest_dir.ancestors().nth(3) else {
        return Vec::new();
    };
    ["debug", "release"]
        .iter()
        .map(|profile| repo_root.join("target").join(profile))
        .collect()
}

fn lib_artifact_names(target_os: &str) -> Vec<&'static str> {
    match target_os {
        "windows" => vec!["goat.dll.lib", "goat.lib"],
        "macos" | "ios" => vec!["libgoat.dylib", "libgoat.a"],
        _ => vec!["libgoat.so", "libgoat.a"],
    }
}

fn holds_any(dir: &Path, names: &[&str]) -> bool {
    names.iter().any(|name| dir.join(name).is_file())
}
