// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

// Panicking code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
// Debug code that shouldn't be in production
#![deny(clippy::dbg_macro)]

use std::io::{self, Write};

use anyhow::{Context, Result};
use checkpointctl::config;
use checkpointctl::{ArchiveTaskProvider, Inspector, ViewSelection};
use clap::{Args, Parser, Subcommand};
use log::debug;

#[derive(Parser, Debug)]
#[command(name = "checkpointctl")]
#[command(about = "A tool for in-depth analysis of container checkpoints", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Display low-level information about a container checkpoint
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Checkpoint archives or unpacked checkpoint directories
    #[arg(required = true)]
    targets: Vec<String>,

    /// Display checkpoint statistics
    #[arg(long)]
    stats: bool,

    /// Display an overview of mounts used in the container checkpoint
    #[arg(long)]
    mounts: bool,

    /// Display the process tree of a specific PID
    #[arg(short, long, default_value_t = 0)]
    pid: u32,

    /// Display an overview of processes in the container checkpoint
    #[arg(long)]
    ps_tree: bool,

    /// Display an overview of processes in the container checkpoint with full command line arguments
    #[arg(long)]
    ps_tree_cmd: bool,

    /// Display an overview of processes in the container checkpoint with their environment variables
    #[arg(long)]
    ps_tree_env: bool,

    /// Display the open file descriptors for processes in the container checkpoint
    #[arg(long)]
    files: bool,

    /// Display the open sockets for processes in the container checkpoint
    #[arg(long)]
    sockets: bool,

    /// Show all information about container checkpoints
    #[arg(long)]
    all: bool,

    /// Show metadata about the container
    #[arg(long)]
    metadata: bool,

    /// Display network information from the checkpoint
    #[arg(long)]
    network: bool,

    /// Specify the output format: tree or json
    #[arg(long, default_value = "tree")]
    format: String,
}

impl InspectArgs {
    fn selection(&self) -> ViewSelection {
        ViewSelection {
            stats: self.stats,
            mounts: self.mounts,
            ps_tree: self.ps_tree,
            ps_tree_cmd: self.ps_tree_cmd,
            ps_tree_env: self.ps_tree_env,
            files: self.files,
            sockets: self.sockets,
            show_all: self.all,
            show_metadata: self.metadata,
            show_network: self.network,
            pid_filter: self.pid,
        }
    }
}

fn inspect(args: &InspectArgs) -> Result<()> {
    let provider = ArchiveTaskProvider::new(config::work_dir());
    let inspector = Inspector::new(&provider);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    inspector.run(&args.targets, &args.selection(), &args.format, &mut out)?;
    out.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    simple_logger::init_with_level(config::log_level()).context("failed to set up logging")?;
    debug!("{cli:?}");

    match &cli.command {
        Command::Inspect(args) => inspect(args),
    }
}
