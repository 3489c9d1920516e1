//! Retrieves information about the version of the engine from Git and the build
//! environment. This information is then written to a file in the output
//! directory and can be accessed at runtime by the engine.

use std::path::Path;
use std::{env, fs, io};

fn generate_file(filename: &str, contents: &str) -> io::Result<()> {
    let out_dir = env::var_os("OUT_DIR")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR is not set"))?;
    fs::write(Path::new(&out_dir).join(filename), contents)
}

/// Records the target features the attack tables and bitboard operations
/// benefit from.
fn generate_build_info() -> io::Result<()> {
    // Build scripts are compiled for the host: the target features come from
    // Cargo instead of `cfg!`.
    let enabled = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let enabled = enabled.split(',').collect::<Vec<_>>();
    let features = ["popcnt", "bmi1", "bmi2"]
        .iter()
        .map(|name| format!("{}{name}", if enabled.contains(name) { "+" } else { "-" }))
        .collect::<Vec<_>>()
        .join(",");
    generate_file("features", &features)
}

fn main() -> shadow_rs::SdResult<()> {
    generate_build_info()?;
    shadow_rs::new()
}
