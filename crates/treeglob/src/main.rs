// Copyright 2025 Dotanuki Labs
// SPDX-License-Identifier: MIT

use crate::infra::cli;
use crate::infra::cli::TreeglobCommand;
use treeglob::DirectoryWalker;

mod infra;

fn execute(command: TreeglobCommand) -> anyhow::Result<()> {
    match command {
        TreeglobCommand::WalkTree { config, trace_dirs } => {
            let mut walker = DirectoryWalker::new(config);
            log::debug!(
                "Walking {} pattern(s) below {}",
                walker.config().patterns.len(),
                walker.config().base_dir.display()
            );

            if trace_dirs {
                walker.on_enter_dir(|dir| {
                    println!("[enter] {}", dir.display());
                    Ok(())
                });
                walker.on_exit_dir(|dir| {
                    println!("[exit] {}", dir.display());
                    Ok(())
                });
            }

            for entry in walker.walk() {
                println!("{}", entry?.path().display());
            }
        },
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    better_panic::install();
    human_panic::setup_panic!();
    env_logger::builder()
        .format_timestamp(None)
        .format_module_path(false)
        .format_level(false)
        .format_file(false)
        .format_target(false)
        .init();

    let command = cli::parse_arguments()?;
    execute(command)
}
