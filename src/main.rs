use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use lanegate::testing::{KEY_VALUE_HEADERS, KEY_VALUE_LABELS, KEY_VALUE_MESSAGES};
use lanegate::{candidates, schema, single_candidate, ConstraintTable, DynConstraintSet, SpecFile};

mod cli;
use cli::display::{self, BOLD, DIM};
use cli::{Cli, Commands, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Check {
            spec,
            length,
            format,
            messages,
        } => run_check(&spec, length, format, &messages),
        Commands::Inspect { spec, format } => run_inspect(&spec, format),
        Commands::Demo => run_demo(),
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("lanegate=debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("lanegate=warn"))?
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_spec(path: &Path) -> Result<DynConstraintSet> {
    schema::load(path).with_context(|| format!("loading {}", path.display()))
}

// ═══════════════════════════════════════════════════════════════════════════
// CHECK
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct CheckReport<'a> {
    message: &'a str,
    mask: u16,
    candidates: Vec<String>,
    #[serde(rename = "match")]
    matched: Option<String>,
}

fn run_check(
    spec: &Path,
    length: Option<usize>,
    format: OutputFormat,
    messages: &[String],
) -> Result<()> {
    let set = load_spec(spec)?;
    tracing::info!(messages = messages.len(), ?length, "checking messages");

    let mut reports = Vec::with_capacity(messages.len());
    for (i, message) in messages.iter().enumerate() {
        let bytes = message.as_bytes();
        let mask = match length {
            Some(length) => set.evaluate_len(bytes, length),
            None => {
                if !bytes.is_empty() && bytes.len() <= set.max_offset() {
                    bail!(
                        "message {} is {} bytes but the set reads offset {}; pass --length to gate short input",
                        i,
                        bytes.len(),
                        set.max_offset()
                    );
                }
                set.evaluate(bytes)
            }
        };
        reports.push(CheckReport {
            message,
            mask,
            candidates: candidates(mask).map(|c| set.label(c)).collect(),
            matched: single_candidate(mask).map(|c| set.label(c)),
        });
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => {
            for report in &reports {
                println!(
                    "{} {}  {:<12} {}",
                    display::pad_right(&display::verdict_badge(report.mask), 11),
                    display::format_mask(report.mask, set.candidate_count()),
                    report.matched.as_deref().unwrap_or("-"),
                    display::styled(&[DIM], report.message)
                );
            }
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct RowMasks {
    offset: usize,
    length_mask: u16,
    exclusion_mask: u16,
}

#[derive(Serialize)]
struct Separator {
    first: usize,
    second: usize,
    row: Option<usize>,
}

#[derive(Serialize)]
struct InspectReport {
    spec: SpecFile,
    masks: Vec<RowMasks>,
    separators: Vec<Separator>,
}

fn separators(set: &DynConstraintSet) -> Vec<Separator> {
    let n = set.candidate_count();
    (0..n)
        .flat_map(|first| ((first + 1)..n).map(move |second| (first, second)))
        .map(|(first, second)| Separator {
            first,
            second,
            row: set.distinguishing_row(first, second),
        })
        .collect()
}

fn run_inspect(spec: &Path, format: OutputFormat) -> Result<()> {
    let set = load_spec(spec)?;
    let n = set.candidate_count();

    if format == OutputFormat::Json {
        let report = InspectReport {
            spec: set.to_spec_file(),
            masks: set
                .rows()
                .iter()
                .map(|row| RowMasks {
                    offset: row.offset(),
                    length_mask: row.length_mask(),
                    exclusion_mask: row.exclusion_mask(),
                })
                .collect(),
            separators: separators(&set),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    display::section_top("CANDIDATES");
    for c in 0..n {
        display::row(&format!("{:>2}  {}", c, set.label(c)));
    }
    display::section_bot();

    display::section_top("ROWS");
    display::row(&display::styled(
        &[BOLD],
        &format!(
            "{:>3} {:>7}  {:<w$}  {:<w$}  {:<w$}  bytes",
            "#",
            "offset",
            "care",
            "length",
            "exclude",
            w = n + 2
        ),
    ));
    for (j, row) in set.rows().iter().enumerate() {
        let bytes: Vec<String> = (0..n).map(|c| display::byte_label(row.expected(c))).collect();
        display::row(&format!(
            "{:>3} {:>7}  {:<w$}  {}  {}  {}",
            j,
            row.offset(),
            display::care_strip((0..n).map(|c| row.cares(c))),
            display::format_mask(row.length_mask(), n),
            display::format_mask(row.exclusion_mask(), n),
            bytes.join(" "),
            w = n + 2
        ));
    }
    display::section_bot();

    display::section_top("SEPARATORS");
    for sep in separators(&set) {
        let row = sep
            .row
            .map_or_else(|| "none".to_string(), |j| format!("row {j}"));
        display::row(&format!(
            "{} / {}  {}",
            set.label(sep.first),
            set.label(sep.second),
            row
        ));
    }
    display::section_bot();
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// DEMO
// ═══════════════════════════════════════════════════════════════════════════

fn run_demo() -> Result<()> {
    let set = KEY_VALUE_HEADERS
        .to_dyn()
        .with_labels(KEY_VALUE_LABELS.iter().map(|s| s.to_string()).collect())?;
    let n = set.candidate_count();

    display::section_top("SAMPLE MESSAGES");
    let mut failures = 0;
    for (message, expected) in KEY_VALUE_MESSAGES {
        let bytes = message.as_bytes();
        let direct = set.evaluate(bytes);
        let gated = set.evaluate_len(bytes, bytes.len());
        let ok = direct == expected && gated == expected;
        if !ok {
            failures += 1;
            tracing::warn!(sample = message, expected, direct, gated, "golden mismatch");
        }
        display::row(&format!(
            "{:<26} {}  {}  {:<6} {}",
            message,
            display::format_mask(direct, n),
            display::format_mask(gated, n),
            single_candidate(direct).map_or_else(|| "-".to_string(), |c| set.label(c)),
            display::pass_fail(ok)
        ));
    }
    display::section_bot();

    if failures > 0 {
        bail!("{failures} sample message(s) did not match their pinned mask");
    }
    Ok(())
}
