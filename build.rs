use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let hash = command_output("git", &["rev-parse", "--short", "HEAD"])
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=TRIP_LEDGER_BUILD_HASH={hash}");

    let status = match command_output("git", &["status", "--porcelain"]) {
        Some(output) if output.is_empty() => "clean",
        Some(_) => "dirty",
        None => "unknown",
    };
    println!("cargo:rustc-env=TRIP_LEDGER_BUILD_STATUS={status}");

    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    println!("cargo:rustc-env=TRIP_LEDGER_BUILD_TIMESTAMP={timestamp}");

    for (key, var) in [("TARGET", "TARGET"), ("PROFILE", "PROFILE")] {
        let value = env::var(var).unwrap_or_else(|_| "unknown".to_string());
        println!("cargo:rustc-env=TRIP_LEDGER_BUILD_{key}={value}");
    }
}

/// Runs `program` and returns its trimmed stdout, or `None` when it fails.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
