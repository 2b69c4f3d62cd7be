//! League shell CLI
//!
//! Runs court assignments, score entry, roster import and exports against a
//! league snapshot file.

#[cfg(feature = "cli")]
use anyhow::{anyhow, bail, Context, Result};
#[cfg(feature = "cli")]
use chrono::{NaiveDate, Utc};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use pp_cli::CliConfig;
#[cfg(feature = "cli")]
use pp_core::{record_score, EmailPhase, EntrySurface, LeagueSnapshot, ScoreEntry};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "pp_cli")]
#[command(about = "Court assignments and score entry for league snapshots", long_about = None)]
struct Cli {
    /// League snapshot JSON (defaults to `snapshot_path` from PP_CONFIG_PATH)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Debug-level logging unless RUST_LOG says otherwise
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Print court groups for a week
    Assign {
        /// Week 1-6 (defaults to the upcoming week)
        #[arg(long)]
        week: Option<i64>,

        /// Week announced by an email phase: intro, w1..w5
        #[arg(long, conflicts_with = "week")]
        phase: Option<EmailPhase>,
    },

    /// Record a weekly score
    Record {
        /// Player id or display name
        #[arg(long)]
        player: String,

        /// Week 1-6 (defaults to the week played within the next six days)
        #[arg(long)]
        week: Option<i64>,

        /// Raw points, 0-72
        #[arg(long)]
        points: f64,

        /// A substitute played in this player's place
        #[arg(long)]
        sub: bool,

        /// Substitute name or other note
        #[arg(long, default_value = "")]
        note: String,

        /// Organizer entry: overwrite an existing score
        #[arg(long)]
        admin: bool,
    },

    /// Print standings or export them as CSV
    Standings {
        /// Write CSV here ("-" for `<slug>-scores.csv` in the current directory)
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Import players from a CSV export
    ImportRoster {
        #[arg(long)]
        csv: PathBuf,
    },

    /// Add one player
    AddPlayer {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        dupr_id: Option<String>,
    },

    /// Remove a player and all of their results
    RemovePlayer {
        /// Player id or display name
        #[arg(long)]
        player: String,
    },

    /// Update court and calendar settings
    Courts {
        /// Enabled court numbers, e.g. 1,2,5
        #[arg(long, value_delimiter = ',')]
        enable: Option<Vec<u32>>,

        /// Clear enabled courts so they are sized to the roster
        #[arg(long, conflicts_with = "enable")]
        auto: bool,

        /// Season start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },

    /// Pick a new week-1 seed so week-1 groupings change
    Reroll,

    /// Write plain-text scoresheets for a week
    Scoresheets {
        #[arg(long)]
        week: Option<i64>,

        /// Week announced by an email phase: intro, w1..w5
        #[arg(long, conflicts_with = "week")]
        phase: Option<EmailPhase>,

        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CliConfig::from_env()?;
    let snapshot_path = cli
        .snapshot
        .or_else(|| config.snapshot_path.clone())
        .ok_or_else(|| anyhow!("No snapshot given: pass --snapshot or set snapshot_path in the config file"))?;
    let mut snapshot = pp_cli::load_snapshot(&snapshot_path)?;

    let changed = run(cli.command, &mut snapshot, &config)?;
    if changed {
        pp_cli::save_snapshot(&snapshot_path, &snapshot)?;
        tracing::debug!(path = %snapshot_path.display(), "snapshot saved");
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn today(config: &CliConfig) -> NaiveDate {
    pp_cli::league_today(Utc::now(), config.time_zone)
}

#[cfg(feature = "cli")]
fn player_id(snapshot: &LeagueSnapshot, query: &str) -> Result<pp_core::PlayerId> {
    snapshot
        .find_player(query)
        .map(|p| p.id.clone())
        .ok_or_else(|| anyhow!("No player matching '{query}'"))
}

/// Execute one command; returns whether the snapshot needs saving.
#[cfg(feature = "cli")]
fn run(command: Commands, snapshot: &mut LeagueSnapshot, config: &CliConfig) -> Result<bool> {
    match command {
        Commands::Assign { week, phase } => {
            let week = pp_cli::schedule_week(snapshot.league.start_date, week, phase, today(config))?;
            let history = snapshot.history()?;
            if !pp_core::season::assignments_unlocked(&snapshot.players, &history, week) {
                let waiting = week
                    .previous()
                    .map_or(0, |prev| pp_core::season::missing_count(&snapshot.players, &history, prev));
                println!("Note: waiting on {waiting} player(s) to submit the previous week");
            }
            println!("Week {week}");
            print!("{}", pp_cli::render_assignments(&snapshot.assignments(week)?));
            Ok(false)
        }

        Commands::Record { player, week, points, sub, note, admin } => {
            let entry = ScoreEntry {
                player_id: player_id(snapshot, &player)?,
                week: pp_cli::entry_week(snapshot.league.start_date, week, today(config))?,
                points,
                was_substitute: sub,
                note,
            };
            let surface = if admin { EntrySurface::Admin } else { EntrySurface::Player };
            let recorded = record_score(snapshot, &entry, surface)?;

            println!("Week {} credited: {}", recorded.week, recorded.credited);
            if let Some(week_one) = recorded.week_one {
                println!("Week 1 adjusted to {} ({})", week_one.points, week_one.note);
            }
            Ok(true)
        }

        Commands::Standings { csv } => {
            let rows = snapshot.standings()?;
            match csv {
                Some(path) => {
                    let path = if path.as_os_str() == "-" {
                        PathBuf::from(pp_cli::standings_file_name(&snapshot.league))
                    } else {
                        path
                    };
                    pp_cli::export_standings(&path, &rows)?;
                    println!("Standings written to {}", path.display());
                }
                None => {
                    for row in &rows {
                        let weeks: Vec<String> = row
                            .weeks
                            .iter()
                            .map(|w| w.map_or_else(|| "—".to_string(), |p| p.to_string()))
                            .collect();
                        let marker = if row.week_one_adjusted { " *" } else { "" };
                        println!(
                            "{:>3}  {:<28} {:>6.2}  {}{}",
                            row.seed,
                            row.player.display_name,
                            row.average,
                            weeks.join(" "),
                            marker
                        );
                    }
                }
            }
            Ok(false)
        }

        Commands::ImportRoster { csv } => {
            let rows = pp_cli::parse_roster_file(&csv)?;
            if rows.is_empty() {
                bail!("No rows found. Expected columns like: Full Name, Member Email (or name,email)");
            }
            let stats = pp_cli::import_roster(snapshot, &rows);
            println!("Imported {} player(s), skipped {}", stats.added, stats.skipped);
            Ok(stats.added > 0)
        }

        Commands::AddPlayer { name, email, dupr_id } => {
            match snapshot.add_player(&name, email.as_deref(), dupr_id.as_deref()) {
                Some(id) => println!("Added {name} ({id})"),
                None => bail!("'{name}' is blank or already on the roster"),
            }
            Ok(true)
        }

        Commands::RemovePlayer { player } => {
            let id = player_id(snapshot, &player)?;
            let removed = snapshot.remove_player(&id)?;
            println!("Removed {} and their results", removed.display_name);
            Ok(true)
        }

        Commands::Courts { enable, auto, start_date } => {
            if enable.is_none() && !auto && start_date.is_none() {
                bail!("Nothing to update: pass --enable, --auto or --start-date");
            }
            if auto {
                snapshot.league.set_courts(Vec::new());
            } else if let Some(courts) = enable {
                snapshot.league.set_courts(courts);
            }
            if let Some(date) = start_date {
                snapshot.league.start_date = Some(date);
            }
            println!("Courts enabled: {:?}", snapshot.league.courts_enabled);
            Ok(true)
        }

        Commands::Reroll => {
            let seed = snapshot.league.reroll_seed(Utc::now().timestamp_millis());
            println!("New week 1 seed: {seed}");
            Ok(true)
        }

        Commands::Scoresheets { week, phase, out } => {
            let week = pp_cli::schedule_week(snapshot.league.start_date, week, phase, today(config))?;
            let assignments = snapshot.assignments(week)?;
            let sheets = pp_cli::render_scoresheets(
                &snapshot.league,
                week,
                &assignments,
                &config.portal_url(&snapshot.league.slug),
            );
            std::fs::write(&out, sheets).with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Scoresheets for week {week} written to {}", out.display());
            Ok(false)
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("pp_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
