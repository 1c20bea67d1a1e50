use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use fantasy_scoring::{PlayerStats, PositionCategory, PositionCode, ScoringTable};
use lineup_validator::{
    BudgetLineup, BudgetScheme, DailyLineup, DailyScheme, Player, ScoredPlayer, SlotId,
    TeamSummary,
};
use persistence::{FileTeamStore, PersistenceConfig, TeamStore};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lineup-cli")]
#[command(about = "Inspect fantasy scores, saved teams, and lineup files")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a stats record
    Score {
        /// NHL position code (C, L, R, D, G)
        #[arg(short, long)]
        position: String,

        /// Stats as a JSON object, e.g. '{"goals": 2, "assists": 1}'
        stats: String,
    },

    /// Show the saved budget team
    Team {
        /// Directory holding the saved team file
        #[arg(short, long, default_value = "./data")]
        data_dir: PathBuf,
    },

    /// Delete the saved budget team
    ClearTeam {
        #[arg(short, long, default_value = "./data")]
        data_dir: PathBuf,
    },

    /// Validate a lineup JSON file
    Check {
        /// Lineup file
        file: PathBuf,

        /// Treat the file as a daily slot lineup instead of a budget team
        #[arg(long)]
        daily: bool,

        /// Salary cap override
        #[arg(long)]
        cap: Option<u32>,
    },
}

/// Daily lineup file: `{"players": {"F1": {...}, "G1": null}}`
#[derive(Debug, Deserialize)]
struct DailyFile {
    players: BTreeMap<SlotId, Option<Player>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let table = ScoringTable::default();

    match cli.command {
        Commands::Score { position, stats } => {
            let points = score_stats(&position, &stats, &table)?;
            println!("{} {:.1}", "Fantasy points:".cyan().bold(), points);
        }
        Commands::Team { data_dir } => {
            let store = FileTeamStore::new(PersistenceConfig::new(data_dir))?;
            match store.load().await? {
                Some(saved) => print_summary(&saved.summarize(&table)),
                None => println!("{}", "No team saved yet".yellow()),
            }
        }
        Commands::ClearTeam { data_dir } => {
            let store = FileTeamStore::new(PersistenceConfig::new(data_dir))?;
            store.clear().await?;
            println!("{} {}", "Cleared".green().bold(), store.path().display());
        }
        Commands::Check { file, daily, cap } => {
            let content = read_file(&file)?;
            let outcome = if daily {
                let scheme = DailyScheme { budget_cap: cap, ..Default::default() };
                check_daily(&content, scheme, &table)
            } else {
                let mut scheme = BudgetScheme::default();
                if let Some(cap) = cap {
                    scheme.cap = cap;
                }
                check_budget(&content, scheme, &table)
            };

            match outcome {
                Ok(lines) => {
                    println!("{}", "✅ Lineup is valid".green().bold());
                    for line in lines {
                        println!("  {}", line);
                    }
                }
                Err(e) => {
                    println!("{} {:#}", "❌ Lineup rejected:".red().bold(), e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn score_stats(position: &str, stats: &str, table: &ScoringTable) -> Result<f64> {
    let position: PositionCode = position.parse()?;
    let value: Value = serde_json::from_str(stats).context("Stats must be a JSON object")?;
    let stats = PlayerStats::from_json(position, value)?;
    Ok(table.score(Some(&stats), position.category()))
}

/// Accepts either a bare player array or `{"players": [...]}`
fn parse_budget_players(content: &str) -> Result<Vec<Player>> {
    let value: Value = serde_json::from_str(content).context("Lineup file is not valid JSON")?;
    let players = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => match map.remove("players") {
            Some(players) => players,
            None => bail!("Expected a \"players\" array"),
        },
        _ => bail!("Expected a player array or an object with \"players\""),
    };
    Ok(serde_json::from_value(players)?)
}

fn check_budget(content: &str, scheme: BudgetScheme, table: &ScoringTable) -> Result<Vec<String>> {
    let players = parse_budget_players(content)?;
    let lineup = BudgetLineup::from_players(scheme, &players)?;
    lineup.check_complete()?;

    let mut lines: Vec<String> = lineup
        .players()
        .iter()
        .map(|p| player_line(&ScoredPlayer::new(p.clone(), table)))
        .collect();
    lines.push(format!(
        "Spent {} of {}, {} remaining, {:.1} pts",
        lineup.total_spent(),
        scheme.cap,
        lineup.remaining_budget(),
        lineup.fantasy_points(table)
    ));
    Ok(lines)
}

fn check_daily(content: &str, scheme: DailyScheme, table: &ScoringTable) -> Result<Vec<String>> {
    let file: DailyFile = serde_json::from_str(content).context("Invalid daily lineup file")?;
    let lineup = DailyLineup::from_assignments(scheme, &file.players)?;
    lineup.check_complete()?;

    let mut lines: Vec<String> = lineup
        .slots()
        .filter_map(|(slot, player)| {
            player.map(|p| format!("{:<3} {}", slot, player_line(&ScoredPlayer::new(p.clone(), table))))
        })
        .collect();
    lines.push(format!(
        "Total price {}, {:.1} pts",
        lineup.total_price(),
        lineup.fantasy_points(table)
    ));
    Ok(lines)
}

fn player_line(scored: &ScoredPlayer) -> String {
    let p = &scored.player;
    format!(
        "{:<24} {:<3} {:<4} ${:<3} {:>7.1} pts",
        p.name,
        p.position.display_label(),
        p.team,
        p.price,
        scored.fantasy_points
    )
}

fn print_summary(summary: &TeamSummary) {
    println!("{}", "🏒 MY TEAM".cyan().bold());
    println!(
        "  Last updated: {}",
        summary.last_updated.format("%Y-%m-%d %H:%M UTC")
    );
    println!();

    let groups = [
        (PositionCategory::Forward, &summary.forwards),
        (PositionCategory::Defense, &summary.defense),
        (PositionCategory::Goalie, &summary.goalies),
    ];
    for (category, players) in groups {
        println!("{}", category.plural_name().yellow().bold());
        for scored in players.iter() {
            println!("  {}", player_line(scored));
        }
        println!();
    }

    println!(
        "{} {:.1}",
        "Total fantasy points:".green().bold(),
        summary.total_fantasy_points
    );
    println!(
        "Budget: {} of {} remaining",
        summary.remaining_budget, summary.total_budget
    );
}
