use std::{env, fs, path::Path};

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let manifest = Path::new(&manifest_dir).join("Cargo.toml");
    println!("cargo:rerun-if-changed={}", manifest.display());

    let raw = fs::read_to_string(&manifest).expect("failed to read Cargo.toml");
    let table: toml::Table = toml::from_str(&raw).expect("failed to parse Cargo.toml");
    let package = table
        .get("package")
        .and_then(|p| p.as_table())
        .expect("Cargo.toml missing [package]");

    let field = |key: &str, fallback: &str| -> String {
        package
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(fallback)
            .to_string()
    };

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let dest = Path::new(&out_dir).join("pkg_info.rs");
    let contents = format!(
        r#"pub const PKG_NAME: &str = "{}";
pub const PKG_VERSION: &str = "{}";
pub const PKG_DESCRIPTION: &str = "{}";
"#,
        field("name", "briefcraft"),
        field("version", "0.0.0"),
        field("description", ""),
    );
    fs::write(&dest, contents).expect("failed to write pkg_info.rs");
}
