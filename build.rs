use std::env;
use std::process::Command;
use time::OffsetDateTime;

fn build_year() -> i32 {
    env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|raw| raw.parse::<i64>().ok())
        .and_then(|epoch| OffsetDateTime::from_unix_timestamp(epoch).ok())
        .map(|dt| dt.year())
        .unwrap_or_else(|| OffsetDateTime::now_utc().year())
}

/// Release builds report the bare package version. Debug builds append
/// `-dev` unless the working tree sits exactly on the matching release tag.
fn display_version(package_version: &str) -> String {
    let profile = env::var("PROFILE").unwrap_or_default();
    if profile == "release" {
        return package_version.to_string();
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");

    let expected_tag = format!("v{package_version}");
    let git_tag = Command::new("git")
        .args(["describe", "--tags", "--exact-match"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        });

    if matches!(git_tag.as_deref(), Some(tag) if tag == expected_tag) {
        package_version.to_string()
    } else {
        format!("{package_version}-dev")
    }
}

fn main() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-env-changed=CARGO_PKG_VERSION");

    let package_version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());

    println!("cargo:rustc-env=APP_BUILD_YEAR={}", build_year());
    println!(
        "cargo:rustc-env=APP_VERSION_DISPLAY={}",
        display_version(&package_version)
    );
}
