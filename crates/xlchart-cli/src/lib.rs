//! Grading and export tooling built on the chart extractor.
//!
//! Three commands share this library: `xlchart-check` grades extracted chart
//! configuration against an answer key, `xlchart-dump` prints the extracted
//! configuration as JSON, and `xlchart-export` renders every chart in a
//! workbook to SVG. The command-line surfaces live in [`cli`] so the binaries
//! stay thin wrappers.

pub mod answer;
pub mod check;
pub mod cli;
pub mod dump;
pub mod export;
pub mod render;
pub mod report;
pub mod target;
