//! Roster import from spreadsheet exports.
//!
//! Accepts club exports with a header row (`Full Name`, `Member Email`,
//! `DUPR ID`, ...) or bare `name,email` files without one.

use anyhow::{Context, Result};
use pp_core::LeagueSnapshot;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const HEADER_MARKERS: [&str; 4] = ["name", "email", "full name", "member email"];
const NAME_HEADERS: [&str; 2] = ["name", "full name"];
const EMAIL_HEADERS: [&str; 2] = ["email", "member email"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub name: String,
    pub email: String,
    pub dupr_id: String,
}

/// Import statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub total_rows: u32,
    pub added: u32,
    pub skipped: u32,
}

struct Columns {
    name: Option<usize>,
    email: Option<usize>,
    dupr: Option<usize>,
}

impl Columns {
    fn from_header(header: &[String]) -> Self {
        let find = |labels: &[&str]| labels.iter().find_map(|l| header.iter().position(|h| h == l));
        Self {
            name: find(&NAME_HEADERS),
            email: find(&EMAIL_HEADERS),
            dupr: header.iter().position(|h| h.contains("dupr")),
        }
    }

    fn headerless() -> Self {
        Self { name: Some(0), email: Some(1), dupr: None }
    }
}

fn cell(record: &[String], index: Option<usize>, fallback: usize) -> String {
    index
        .and_then(|i| record.get(i))
        .or_else(|| record.get(fallback))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Parse roster rows; rows with neither a name nor an email are dropped.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<RosterRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut matrix: Vec<Vec<String>> = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV at record {}", line + 1))?;
        matrix.push(record.iter().map(str::to_string).collect());
    }
    if let Some(first) = matrix.first_mut().and_then(|row| row.first_mut()) {
        *first = first.trim_start_matches('\u{feff}').trim().to_string();
    }

    let Some(first) = matrix.first() else {
        return Ok(Vec::new());
    };
    let header: Vec<String> = first.iter().map(|h| h.trim().to_lowercase()).collect();
    let has_header = header.iter().any(|h| HEADER_MARKERS.contains(&h.as_str()));
    let (columns, body) = if has_header {
        (Columns::from_header(&header), &matrix[1..])
    } else {
        (Columns::headerless(), &matrix[..])
    };

    let rows = body
        .iter()
        .map(|record| RosterRow {
            name: cell(record, columns.name, 0),
            email: cell(record, columns.email, 1),
            dupr_id: columns.dupr.and_then(|i| record.get(i)).map(|v| v.trim().to_string()).unwrap_or_default(),
        })
        .filter(|row| !row.name.is_empty() || !row.email.is_empty())
        .collect();
    Ok(rows)
}

pub fn parse_roster_file(path: &Path) -> Result<Vec<RosterRow>> {
    let file = File::open(path).with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    parse_roster(file).with_context(|| format!("Failed to parse CSV file: {}", path.display()))
}

/// Add every named row not already on the roster.
pub fn import_roster(snapshot: &mut LeagueSnapshot, rows: &[RosterRow]) -> ImportStats {
    let mut stats = ImportStats::default();
    for row in rows {
        stats.total_rows += 1;
        let email = Some(row.email.as_str());
        let dupr = Some(row.dupr_id.as_str());
        match snapshot.add_player(&row.name, email, dupr) {
            Some(_) => stats.added += 1,
            None => stats.skipped += 1,
        }
    }
    tracing::info!(added = stats.added, skipped = stats.skipped, "roster import finished");
    stats
}
