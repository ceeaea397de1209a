use anyhow::Result;
use clap::Parser;

use xlchart_cli::cli::{run_check, CheckArgs};

fn main() -> Result<()> {
    run_check(&CheckArgs::parse())
}
