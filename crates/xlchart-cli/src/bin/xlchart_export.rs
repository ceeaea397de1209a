use anyhow::Result;
use clap::Parser;

use xlchart_cli::cli::{run_export, ExportArgs};

fn main() -> Result<()> {
    run_export(&ExportArgs::parse())
}
