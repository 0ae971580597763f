//! CSV export of the decision history.
//!
//! Layout: header `Round,Mode,Threat,User_Reject,Result,Time`, then one row per
//! decision. Nothing is quoted: booleans are `True`/`False`, times always carry
//! a decimal point (`2.0`, `0.37`).

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::constants::CSV_COLUMNS;
use crate::error::ExportError;
use crate::types::DecisionRecord;

fn bool_field(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

/// Shortest round-trip representation that always includes a decimal point.
fn float_field(x: f64) -> String {
    format!("{:?}", x)
}

/// Write the header and one row per record.
pub fn write_csv<W: Write>(records: &[DecisionRecord], mut w: W) -> io::Result<()> {
    writeln!(w, "{}", CSV_COLUMNS.join(","))?;
    for r in records {
        writeln!(
            w,
            "{},{},{},{},{},{}",
            r.round,
            r.mode,
            bool_field(r.threat),
            bool_field(r.user_reject),
            r.result,
            float_field(r.time)
        )?;
    }
    w.flush()
}

/// Render the export in memory.
pub fn to_csv_string(records: &[DecisionRecord]) -> String {
    let mut buf = Vec::new();
    write_csv(records, &mut buf).expect("writing to a Vec<u8> cannot fail");
    String::from_utf8(buf).expect("CSV fields are ASCII")
}

/// Write the export to `path`, creating parent directories. Refuses an empty history.
pub fn save_csv(records: &[DecisionRecord], path: &Path) -> Result<(), ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }
    let io_err = |source: io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let f = File::create(path).map_err(io_err)?;
    write_csv(records, BufWriter::new(f)).map_err(io_err)?;

    info!(path = %path.display(), rows = records.len(), "exported decisions");
    Ok(())
}
