//! JSON report generator

use serde::Serialize;
use std::io::{self, Write};

/// Write any summary as pretty-printed JSON followed by a newline
pub fn write_report<W, T>(out: &mut W, summary: &T) -> io::Result<()>
where
    W: Write + ?Sized,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)
}
