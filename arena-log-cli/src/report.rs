//! Report generation
//!
//! Renders the library's summaries as a text report or as JSON.

pub mod json;
pub mod txt;

use crate::config::OutputFormat;
use arena_log_analyzer::{BrainSummary, RunSummary};
use std::io::{self, Write};

pub fn write_brain_report<W: Write + ?Sized>(
    out: &mut W,
    format: OutputFormat,
    summary: &BrainSummary,
) -> io::Result<()> {
    match format {
        OutputFormat::Txt => txt::write_brain_report(out, summary),
        OutputFormat::Json => json::write_report(out, summary),
    }
}

pub fn write_run_report<W: Write + ?Sized>(
    out: &mut W,
    format: OutputFormat,
    summary: &RunSummary,
) -> io::Result<()> {
    match format {
        OutputFormat::Txt => txt::write_run_report(out, summary),
        OutputFormat::Json => json::write_report(out, summary),
    }
}
