// Build script that ships the checked-in C header and keeps it honest.
//
// - Copies `include/pricetone.h` to $OUT_DIR so downstream build systems can
//   find it next to the compiled library.
// - Warns (without failing the build) for every `#[no_mangle]` function in
//   `src/lib.rs` that the header does not declare.

use std::{env, fs, path::PathBuf};

fn exported_symbols(src: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut lines = src.lines().map(str::trim);
    while let Some(line) = lines.next() {
        if line != "#[no_mangle]" {
            continue;
        }
        let Some(sig) = lines.next() else { break };
        if let Some(rest) = sig.split("fn ").nth(1) {
            if let Some(name) = rest.split('(').next() {
                names.push(name.trim());
            }
        }
    }
    names
}

fn main() {
    // Re-run build.rs if these change
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=include/pricetone.h");

    let crate_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"));
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let header_repo = crate_dir.join("include").join("pricetone.h");
    let header_out = out_dir.join("pricetone.h");

    let header = fs::read_to_string(&header_repo).unwrap_or_default();
    if header.is_empty() {
        println!("cargo:warning=pricetone-ffi: include/pricetone.h missing or empty");
    } else if let Ok(src) = fs::read_to_string(crate_dir.join("src").join("lib.rs")) {
        for name in exported_symbols(&src) {
            if !header.contains(name) {
                println!("cargo:warning=pricetone-ffi: `{name}` is exported but not declared in include/pricetone.h");
            }
        }
    }

    fs::write(&header_out, header).expect("failed to write pricetone.h to OUT_DIR");
}
