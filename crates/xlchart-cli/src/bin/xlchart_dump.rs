use anyhow::Result;
use clap::Parser;

use xlchart_cli::cli::{run_dump, DumpArgs};

fn main() -> Result<()> {
    run_dump(&DumpArgs::parse())
}
