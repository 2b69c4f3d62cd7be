//! League shell library
//!
//! Snapshot file I/O, roster CSV import and the CSV/text exports used by the
//! `pp_cli` binary.

pub mod calendar;
pub mod config;
pub mod export;
pub mod roster_csv;
pub mod snapshot_io;

pub use calendar::{entry_week, league_today, schedule_week};
pub use config::{CliConfig, CONFIG_PATH_ENV};
pub use export::{export_standings, render_assignments, render_scoresheets, standings_file_name};
pub use roster_csv::{import_roster, parse_roster, parse_roster_file, ImportStats, RosterRow};
pub use snapshot_io::{load_snapshot, save_snapshot};
