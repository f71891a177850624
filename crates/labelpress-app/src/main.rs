// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Labelpress — send rendered PDF labels to a CUPS queue over IPP
//
// Entry point. Initialises logging, loads settings, resolves the job, and
// submits it (or prints the resolved attributes with --dry-run).

mod cli;

use std::process::ExitCode;

use clap::Parser;

use labelpress_core::error::Result;
use labelpress_core::types::PrintSettings;
use labelpress_print::LabelPrinter;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "Labelpress starting");

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, file = %cli.file.display(), "label was not printed");
            eprintln!("labelpress: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let stored = PrintSettings::from_raw(&cli.raw_settings()?)?;
    let document = std::fs::read(&cli.file)?;
    let job = cli.label_job(&stored, document)?;

    let printer = LabelPrinter::ipp();

    if cli.dry_run {
        let attributes = printer.preview(&job)?;
        println!("# {} ({})", job.settings.printer_uri(), job.job_name());
        println!("{attributes}");
        return Ok(());
    }

    let submitted = printer.print(&job).await?;
    println!(
        "submitted job {} to {}",
        submitted.job_id, submitted.printer_uri
    );
    Ok(())
}
