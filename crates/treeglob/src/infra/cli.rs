// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::infra::cli::Commands::Walk;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use treeglob::{DepthLimit, WalkerConfig};

#[derive(Args, Debug)]
#[command(version, about, long_about = None)]
struct WalkArguments {
    #[arg(short, long, help = "Base directory to walk from")]
    pub path: PathBuf,

    #[arg(short = 'g', long = "pattern", required = true, help = "Glob pattern to match file names against")]
    pub patterns: Vec<String>,

    #[arg(
        short = 'd',
        long,
        default_value_t = -1,
        allow_negative_numbers = true,
        help = "How many subdirectory levels to descend (negative means no limit)"
    )]
    pub max_depth: i64,

    #[arg(short, long, action, help = "Whether to print entered and exited directories")]
    pub trace_dirs: bool,
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = false)]
struct CliParser {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints every file below a directory matching the given patterns
    Walk(WalkArguments),
}

#[derive(Debug)]
pub enum TreeglobCommand {
    WalkTree { config: WalkerConfig, trace_dirs: bool },
}

pub fn parse_arguments() -> anyhow::Result<TreeglobCommand> {
    let cli = CliParser::parse();

    let execution = match cli.command {
        Walk(args) => TreeglobCommand::WalkTree {
            config: WalkerConfig::new(args.path, args.patterns).with_max_depth(DepthLimit::from(args.max_depth)),
            trace_dirs: args.trace_dirs,
        },
    };

    Ok(execution)
}
