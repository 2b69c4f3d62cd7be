//! Standings CSV and plain-text court sheets.

use anyhow::{Context, Result};
use pp_core::models::League;
use pp_core::season::week_date;
use pp_core::{CourtAssignment, StandingRow, Week};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const STANDINGS_HEADERS: [&str; 10] = ["Seed", "Name", "Email", "W1", "W2", "W3", "W4", "W5", "W6", "Avg(1–6)"];

pub fn write_standings_csv<W: Write>(writer: W, rows: &[StandingRow]) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(STANDINGS_HEADERS)?;
    for row in rows {
        let mut record = vec![
            row.seed.to_string(),
            row.player.display_name.clone(),
            row.player.email.clone().unwrap_or_default(),
        ];
        record.extend(row.weeks.iter().map(|w| w.map(|p| p.to_string()).unwrap_or_default()));
        record.push(format!("{:.2}", row.average));
        out.write_record(&record)?;
    }
    out.flush()?;
    Ok(())
}

pub fn export_standings(path: &Path, rows: &[StandingRow]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    write_standings_csv(file, rows).with_context(|| format!("Failed to write CSV file: {}", path.display()))
}

/// Default export file name, e.g. `tuesday-scores.csv`.
pub fn standings_file_name(league: &League) -> String {
    let slug = if league.slug.is_empty() { "league" } else { league.slug.as_str() };
    format!("{slug}-scores.csv")
}

/// One line per court: `Court 6: Emery, Avery, Blake, Casey`.
pub fn render_assignments(assignments: &[CourtAssignment]) -> String {
    if assignments.is_empty() {
        return "No court assignments available yet.\n".to_string();
    }
    assignments
        .iter()
        .map(|a| {
            let names: Vec<&str> = a.players.iter().map(|p| p.display_name.as_str()).collect();
            format!("Court {}: {}\n", a.court, names.join(", "))
        })
        .collect()
}

/// Printable scoresheets, one block per court.
pub fn render_scoresheets(league: &League, week: Week, assignments: &[CourtAssignment], portal_url: &str) -> String {
    let date = league
        .start_date
        .and_then(|start| week_date(start, week.number()))
        .map(|d| format!(" ({})", d.format("%-m/%-d/%Y")))
        .unwrap_or_default();

    let mut out = String::new();
    for assignment in assignments {
        out.push_str(&format!("{} — Court {} — Week {}{}\n", league.label(), assignment.court, week, date));
        out.push_str(&format!("COURT {}\n", assignment.court));
        for (seat, player) in assignment.players.iter().enumerate() {
            out.push_str(&format!("  {}. {:<28} ____\n", seat + 1, player.display_name));
        }
        out.push_str(&format!("Enter your scores at {portal_url}\n\n"));
    }
    out
}
