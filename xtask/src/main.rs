//! Custom cargo commands for the lanegate crate.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask check     - Quick check (no Kani)
//!   cargo xtask bench     - Run benchmarks
//!   cargo xtask kani      - Run Kani proofs
//!   cargo xtask fuzz      - Run each fuzz target briefly

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Seconds each fuzz target runs under `cargo xtask fuzz`.
const FUZZ_SECONDS: u32 = 60;

const FUZZ_TARGETS: [&str; 2] = ["evaluate_bounds", "constraint_builder"];

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("bench") => bench()?,
        Some("kani") => kani()?,
        Some("fuzz") => fuzz()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (markers + tests + clippy + Kani + mirrors)
  test      Run all Rust tests
  check     Quick check (cargo check + test + clippy, no Kani)
  bench     Run benchmarks
  kani      Run Kani model checking proofs
  fuzz      Run each fuzz target for {FUZZ_SECONDS}s (needs cargo-fuzz, nightly)
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("Lanegate Verification Suite");
    println!("==========================================\n");

    println!("[1/5] Checking invariant markers...");
    check_invariant_markers()?;
    println!("✓ Invariant markers present\n");

    println!("[2/5] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/5] Running Kani proofs...");
    kani()?;
    println!("✓ Kani proofs pass\n");

    println!("[5/5] Checking proof mirrors against the crate...");
    verify_mirrors()?;
    println!("✓ Mirrors aligned\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check (no Kani)
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench", "--bench", "discriminator_bench"])
}

/// Run Kani proofs in the standalone proof crate
fn kani() -> Result<()> {
    let dir = project_root()?.join("kani-proofs");
    let status = Command::new("cargo")
        .arg("kani")
        .current_dir(&dir)
        .status()
        .context("Failed to run cargo kani (is kani-verifier installed?)")?;

    if !status.success() {
        bail!("Kani proofs failed");
    }
    Ok(())
}

/// Run each fuzz target for a fixed time budget
fn fuzz() -> Result<()> {
    let root = project_root()?;
    let max_time = format!("-max_total_time={FUZZ_SECONDS}");
    for target in FUZZ_TARGETS {
        println!("Fuzzing {target}...");
        let status = Command::new("cargo")
            .args(["+nightly", "fuzz", "run", target, "--", &max_time])
            .current_dir(&root)
            .status()
            .with_context(|| format!("Failed to run cargo fuzz for {target}"))?;

        if !status.success() {
            bail!("fuzz target {target} failed");
        }
    }
    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

fn check_invariant_markers() -> Result<()> {
    let root = project_root()?;
    let src_dir = root.join("src");

    let output = Command::new("grep")
        .args(["-r", "INVARIANT:", "--include=*.rs"])
        .current_dir(&src_dir)
        .output()
        .context("Failed to run grep")?;

    let count = output.stdout.split(|&b| b == b'\n').filter(|l| !l.is_empty()).count();

    if count < 5 {
        bail!(
            "Expected at least 5 INVARIANT markers, found {}. Someone may have removed safety comments!",
            count
        );
    }

    Ok(())
}

/// The proof crate re-states the gate and lane compare; make sure the
/// arithmetic it proves is still the arithmetic the crate runs.
fn verify_mirrors() -> Result<()> {
    let root = project_root()?;
    let proofs = std::fs::read_to_string(root.join("kani-proofs/src/lib.rs"))
        .context("Failed to read kani-proofs/src/lib.rs")?;
    let gate = std::fs::read_to_string(root.join("src/gate.rs")).context("Failed to read gate.rs")?;
    let simd = std::fs::read_to_string(root.join("src/util/simd.rs"))
        .context("Failed to read util/simd.rs")?;

    let shared = [
        (&gate, "a.overflowing_sub(b)"),
        (&gate, "(a & mask) | (b & !mask)"),
        (&gate, "select_usize(in_range, offset, 0)"),
        (&gate, "select_u16(in_range, 0, exclusion)"),
        (&simd, "(diff | diff.wrapping_neg()) >> 7"),
        (&simd, "(nonzero ^ 1).wrapping_neg()"),
    ];

    for (source, fragment) in shared {
        if !source.contains(fragment) {
            bail!("crate no longer contains `{fragment}`; update kani-proofs");
        }
        if !proofs.contains(fragment) {
            bail!("kani-proofs no longer contains `{fragment}`; proofs are stale");
        }
    }

    println!("  {} shared fragments match", shared.len());
    Ok(())
}
