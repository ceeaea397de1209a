//! Command-line surfaces for the three binaries.
//!
//! The argument structs and run functions live here in the library so the
//! binaries stay true thin wrappers and the batch drivers can be tested.
//!
//! Every command accepts either a single file or a directory; a directory
//! runs the command over its `*.xlsx` workbooks in sorted order, reporting
//! each workbook on stderr and continuing past per-workbook failures.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::answer::load_answer;
use crate::check::compare;
use crate::dump::dump_records;
use crate::export::export_workbook;
use crate::report::write_report;
use crate::target::load_target;
use xlchart_xlsx::read_workbook;

/// Grade workbook charts against an answer key.
#[derive(Debug, Parser)]
#[command(name = "xlchart-check", version)]
pub struct CheckArgs {
    /// Workbook (.xlsx), pre-dumped chart JSON, or directory of workbooks.
    pub target: PathBuf,
    /// Answer key (.toml or .json).
    pub answer: PathBuf,
}

/// Dump extracted chart configuration as JSON.
#[derive(Debug, Parser)]
#[command(name = "xlchart-dump", version)]
pub struct DumpArgs {
    /// Workbook (.xlsx) or directory of workbooks.
    pub target: PathBuf,
}

/// Export workbook charts as SVG images.
#[derive(Debug, Parser)]
#[command(name = "xlchart-export", version)]
pub struct ExportArgs {
    /// Workbook (.xlsx) or directory of workbooks.
    pub target: PathBuf,
    /// Destination directory. Defaults to the workbook's directory, or to
    /// the target directory itself in batch mode.
    pub dest: Option<PathBuf>,
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let answer = load_answer(&args.answer)?;

    if args.target.is_file() {
        let target = load_target(&args.target)?;
        let rows = compare(&target, &answer);
        let stdout = std::io::stdout();
        write_report(&mut stdout.lock(), &rows, false)?;
        return Ok(());
    }

    if args.target.is_dir() {
        for workbook in workbooks_in(&args.target)? {
            eprintln!("{}", workbook.display());
            let rows = match load_target(&workbook).map(|target| compare(&target, &answer)) {
                Ok(rows) => rows,
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    continue;
                }
            };
            let output = workbook.with_extension("tsv");
            if let Err(e) = write_report_file(&output, &rows) {
                eprintln!("Error: {e:#}");
            }
        }
        return Ok(());
    }

    bail!("No such file or directory: {}", args.target.display());
}

pub fn run_dump(args: &DumpArgs) -> Result<()> {
    if args.target.is_file() {
        let records = read_workbook(&args.target)?;
        print!("{}", dump_records(&records)?);
        return Ok(());
    }

    if args.target.is_dir() {
        for workbook in workbooks_in(&args.target)? {
            eprintln!("{}", workbook.display());
            let text = match read_workbook(&workbook).map_err(anyhow::Error::from) {
                Ok(records) => dump_records(&records)?,
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    continue;
                }
            };
            let output = workbook.with_extension("json");
            if let Err(e) = fs::write(&output, text)
                .with_context(|| format!("failed to write {}", output.display()))
            {
                eprintln!("Error: {e:#}");
            }
        }
        return Ok(());
    }

    bail!("No such file or directory: {}", args.target.display());
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    if args.target.is_file() {
        let dest = match &args.dest {
            Some(dest) => dest.clone(),
            None => args
                .target
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        export_workbook(&args.target, &dest)?;
        return Ok(());
    }

    if args.target.is_dir() {
        let dest = args.dest.clone().unwrap_or_else(|| args.target.clone());
        for workbook in workbooks_in(&args.target)? {
            eprintln!("{}", workbook.display());
            if let Err(e) = export_workbook(&workbook, &dest) {
                eprintln!("Error: {e:#}");
            }
        }
        return Ok(());
    }

    bail!("No such file or directory: {}", args.target.display());
}

/// Workbooks directly inside `dir`, sorted by path for stable batch order.
fn workbooks_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory {}", dir.display()))?;
    let mut books = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to read directory {}", dir.display()))?
            .path();
        let is_xlsx = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
        if is_xlsx {
            books.push(path);
        }
    }
    books.sort();
    Ok(books)
}

fn write_report_file(path: &Path, rows: &[crate::check::CheckResult]) -> Result<()> {
    let file =
        fs::File::create(path).with_context(|| format!("failed to write {}", path.display()))?;
    let mut out = std::io::BufWriter::new(file);
    write_report(&mut out, rows, true)?;
    out.flush()?;
    Ok(())
}
