//! Pairwise-match CSV import/export.
//!
//! One correspondence per record, no header, `#` comment lines allowed:
//!
//! ```text
//! # first_view, second_view, train_idx, query_idx
//! 0,1,12,340
//! ```
//!
//! Consecutive records sharing a view pair are grouped into one
//! [`PairMatches`] record, so a file written pair by pair loads back
//! into the same grouping.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use crate::matches::{IndMatch, PairMatches, ViewId};

/// Load pairwise matches from a CSV file.
pub fn load_pairwise_matches<P: AsRef<Path>>(path: P) -> Result<Vec<PairMatches<ViewId>>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    read_pairwise_matches(file)
}

/// Read pairwise matches from any reader (see the module docs for the
/// format). Records with fewer than four fields are skipped.
pub fn read_pairwise_matches<R: Read>(reader: R) -> Result<Vec<PairMatches<ViewId>>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader);

    let mut pairs: Vec<PairMatches<ViewId>> = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.len() < 4 {
            continue;
        }
        let first = ViewId::new(rec[0].trim().parse()?);
        let second = ViewId::new(rec[1].trim().parse()?);
        let m = IndMatch {
            train_idx: rec[2].trim().parse()?,
            query_idx: rec[3].trim().parse()?,
        };
        match pairs.last_mut() {
            Some(pair) if pair.first == first && pair.second == second => pair.matches.push(m),
            _ => pairs.push(PairMatches::new(first, second, vec![m])),
        }
    }
    Ok(pairs)
}

/// Save pairwise matches as CSV, one correspondence per record.
pub fn save_pairwise_matches<P: AsRef<Path>>(
    path: P,
    pairs: &[PairMatches<ViewId>],
) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_pairwise_matches(file, pairs)
}

/// Write pairwise matches to any writer.
pub fn write_pairwise_matches<W: Write>(writer: W, pairs: &[PairMatches<ViewId>]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for pair in pairs {
        for m in &pair.matches {
            wtr.write_record(&[
                pair.first.0.to_string(),
                pair.second.0.to_string(),
                m.train_idx.to_string(),
                m.query_idx.to_string(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}
