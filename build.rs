use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=POLYGLOT_CATALOG_HINT");
    println!("cargo:rerun-if-changed=schema/mappings.json");

    let hint = env::var("POLYGLOT_CATALOG_HINT").ok().or_else(|| {
        env::var("CARGO_MANIFEST_DIR")
            .ok()
            .map(|dir| format!("{dir}/schema/mappings.json"))
    });

    if let Some(raw_hint) = hint {
        let candidate = PathBuf::from(raw_hint);
        let canonical = candidate.canonicalize().unwrap_or(candidate);

        println!(
            "cargo:rustc-env=POLYGLOT_CATALOG_HINT={}",
            canonical.display()
        );
    }
}
