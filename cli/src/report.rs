//! Result rows and their output formats

use crate::cases::Case;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;

/// Timing for one case at one input size
#[derive(Debug, Serialize)]
pub(crate) struct Row {
    case: Case,
    size: usize,
    iterations: u32,
    total_ns: u64,
    ns_per_run: f64,
    ns_per_element: f64,
}

impl Row {
    pub(crate) fn new(case: Case, size: usize, iterations: u32, elapsed: Duration) -> Self {
        let total_ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        let ns_per_run = total_ns as f64 / f64::from(iterations.max(1));
        Self {
            case,
            size,
            iterations,
            total_ns,
            ns_per_run,
            ns_per_element: ns_per_run / size.max(1) as f64,
        }
    }
}

/// Aligned plain-text table, one row per line.
pub(crate) fn write_table<W: Write>(rows: &[Row], out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{:<28} {:>8} {:>14} {:>12}",
        "case", "size", "ns/run", "ns/element"
    )?;
    for row in rows {
        writeln!(
            out,
            "{:<28} {:>8} {:>14.1} {:>12.2}",
            row.case.to_string(),
            row.size,
            row.ns_per_run,
            row.ns_per_element
        )?;
    }
    Ok(())
}

/// A pretty-printed JSON array of rows.
pub(crate) fn write_json<W: Write>(rows: &[Row], out: &mut W) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, rows)?;
    writeln!(out).map_err(serde_json::Error::io)
}

#[cfg(test)]
mod test {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            Row::new(Case::VectorPush, 8, 4, Duration::from_nanos(800)),
            Row::new(Case::StdBtreemapLookup, 16, 4, Duration::from_nanos(6400)),
        ]
    }

    #[test]
    fn per_run_and_per_element() {
        let row = &rows()[1];
        assert_eq!(row.total_ns, 6400);
        assert_eq!(row.ns_per_run, 1600.0);
        assert_eq!(row.ns_per_element, 100.0);
    }

    #[test]
    fn table_layout() {
        let mut out = Vec::new();
        write_table(&rows(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("case"));
        assert!(lines[1].starts_with("vector-push"));
        assert!(lines[2].contains("std-btreemap-lookup"));
    }

    #[test]
    fn json_uses_case_names() {
        let mut out = Vec::new();
        write_json(&rows(), &mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["case"], "vector-push");
        assert_eq!(parsed[1]["size"], 16);
        assert_eq!(parsed[1]["ns_per_element"], 100.0);
    }
}
