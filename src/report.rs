//! Tab-separated report output for retained solutions.
//!
//! The format is meant for machine analysis: one header line naming the
//! start coordinates `s0..` and refined coordinates `x0..`, then one row per
//! solution (see the `Display` impl of [`Solution`]).

use std::io::Write;

use crate::error::Result;
use crate::solution::Solution;

/// Writes report rows to a stream, emitting the header at most once.
#[derive(Debug)]
pub struct ReportWriter<W: Write> {
    inner: W,
    headered: bool,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            headered: false,
        }
    }

    /// Has the header already been written to this stream?
    pub fn is_headered(&self) -> bool {
        self.headered
    }

    /// Write the header for `ndim`-dimensional solutions, unless already done.
    pub fn write_header(&mut self, ndim: usize) -> Result<()> {
        if self.headered {
            return Ok(());
        }
        write!(self.inner, "idx\ttstart\t")?;
        for i in 0..ndim {
            write!(self.inner, "s{}\t", i)?;
        }
        write!(self.inner, "fs\ttstop\t")?;
        for i in 0..ndim {
            write!(self.inner, "x{}\t", i)?;
        }
        writeln!(self.inner, "min\tdist\tnsteps")?;
        self.headered = true;
        Ok(())
    }

    /// Write one row per solution, preceded by the header on first use.
    /// An empty slice writes nothing.
    pub fn write_solutions(&mut self, solutions: &[Solution]) -> Result<()> {
        let Some(first) = solutions.first() else {
            return Ok(());
        };
        self.write_header(first.ndims())?;
        for s in solutions {
            writeln!(self.inner, "{}", s)?;
        }
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Write a complete report (header and rows) for `solutions`.
pub fn print_report<W: Write>(solutions: &[Solution], writer: W) -> Result<()> {
    ReportWriter::new(writer).write_solutions(solutions)
}
