use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_STANDINGS_PATH: &str = "data/final_standings.csv";

/// One player's aggregated record. `win_rate` is always a fraction once the
/// row leaves this module. `rank` is whatever finite number the file holds;
/// only 1..=3 earns the top badge.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingRow {
    pub rank: f64,
    pub player: String,
    pub model: Option<String>,
    pub prompt: Option<String>,
    pub rating_mu: f64,
    pub rating_sigma: f64,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub games: u32,
    pub win_rate: Option<f64>,
}

impl StandingRow {
    pub fn is_top3(&self) -> bool {
        (1.0..=3.0).contains(&self.rank)
    }

    pub fn is_high_win_rate(&self) -> bool {
        self.win_rate.is_some_and(|wr| wr >= HIGH_WIN_RATE)
    }
}

pub const HIGH_WIN_RATE: f64 = 0.80;

// Every cell is read as text; typing happens in `normalize_row` so a single
// bad cell never fails the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
struct RawStandingRow {
    #[serde(rename = "Rank", default)]
    rank: Option<String>,
    #[serde(rename = "Player", default)]
    player: Option<String>,
    #[serde(rename = "Model", default)]
    model: Option<String>,
    #[serde(rename = "Prompt", default)]
    prompt: Option<String>,
    #[serde(rename = "Rating_Mu", default)]
    rating_mu: Option<String>,
    #[serde(rename = "Rating_Sigma", default)]
    rating_sigma: Option<String>,
    #[serde(rename = "Wins", default)]
    wins: Option<String>,
    #[serde(rename = "Draws", default)]
    draws: Option<String>,
    #[serde(rename = "Losses", default)]
    losses: Option<String>,
    #[serde(rename = "Games", default)]
    games: Option<String>,
    #[serde(rename = "Win_Rate", default)]
    win_rate: Option<String>,
}

pub fn load_standings(path: &Path) -> Result<Vec<StandingRow>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    parse_standings(file).with_context(|| format!("parse {}", path.display()))
}

/// Parse a standings CSV (header row required). Structural CSV errors fail
/// the whole load; malformed rows are dropped.
pub fn parse_standings<R: Read>(reader: R) -> Result<Vec<StandingRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, record) in rdr.deserialize::<RawStandingRow>().enumerate() {
        let raw = record.with_context(|| format!("record {}", idx + 1))?;
        if let Some(row) = normalize_row(raw) {
            rows.push(row);
        }
    }
    Ok(rows)
}

pub fn parse_standings_str(raw: &str) -> Result<Vec<StandingRow>> {
    parse_standings(raw.as_bytes())
}

fn normalize_row(raw: RawStandingRow) -> Option<StandingRow> {
    let player = non_empty(raw.player)?;
    let rank = parse_rank(raw.rank.as_deref()?)?;

    Some(StandingRow {
        rank,
        player,
        model: non_empty(raw.model),
        prompt: non_empty(raw.prompt),
        rating_mu: parse_float(raw.rating_mu.as_deref()),
        rating_sigma: parse_float(raw.rating_sigma.as_deref()),
        wins: parse_count(raw.wins.as_deref()),
        draws: parse_count(raw.draws.as_deref()),
        losses: parse_count(raw.losses.as_deref()),
        games: parse_count(raw.games.as_deref()),
        win_rate: raw
            .win_rate
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .map(normalize_win_rate),
    })
}

/// Percentages (anything above 1) become fractions. Call once per value.
/// Out-of-range inputs are clamped into [0, 1].
pub fn normalize_win_rate(value: f64) -> f64 {
    let fraction = if value > 1.0 { value / 100.0 } else { value };
    fraction.clamp(0.0, 1.0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_rank(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_float(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn parse_count(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim) else {
        return 0;
    };
    raw.parse::<u32>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.round() as u32)
        })
        .unwrap_or(0)
}
