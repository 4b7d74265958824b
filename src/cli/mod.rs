// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the lanegate command-line interface.
//!
//! Three subcommands: `check` to classify messages against a spec file,
//! `inspect` to show the validated table and its derived masks, and `demo`
//! to run the built-in sample set against its pinned results.

pub mod display;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lanegate",
    about = "Constant-time message discrimination by byte-offset constraints",
    version
)]
pub struct Cli {
    /// Log builder and loader activity (overrides RUST_LOG's default)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify messages against a constraint spec file
    Check {
        /// Path to the JSON spec file
        #[arg(short, long)]
        spec: PathBuf,

        /// Treat each message as this many bytes long (engages the length gate)
        ///
        /// Without it every message must cover the set's largest offset.
        #[arg(short, long)]
        length: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Messages to classify, taken as raw bytes
        #[arg(required = true)]
        messages: Vec<String>,
    },

    /// Show a spec file's rows, derived masks and pair separators
    Inspect {
        /// Path to the JSON spec file
        #[arg(short, long)]
        spec: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Run the built-in sample set and compare against its pinned masks
    Demo,
}
