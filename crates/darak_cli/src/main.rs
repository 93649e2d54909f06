//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `darak_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("darak_core ping={}", darak_core::ping());
    println!("darak_core version={}", darak_core::core_version());
    println!(
        "darak_core schema_version={}",
        darak_core::db::migrations::latest_version()
    );
}
