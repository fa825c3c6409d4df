use crate::pins::PinSet;
use crate::standings::StandingRow;

pub const COLUMN_COUNT: usize = 12;
pub const PROMPT_DISPLAY_CHARS: usize = 120;
pub const LOAD_FAILED_TEXT: &str = "Failed to load data.";

pub const COLUMNS: [&str; COLUMN_COUNT] = [
    "Pin", "Rank", "Player", "Model", "Prompt", "Mu", "Sigma", "W", "D", "L", "Games", "Win%",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Badges {
    pub top3: bool,
    pub high_win_rate: bool,
    pub pinned: bool,
}

impl Badges {
    pub fn labels(self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.top3 {
            out.push("Top 3");
        }
        if self.high_win_rate {
            out.push("80%+");
        }
        out
    }

    pub fn classes(self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.top3 {
            out.push("row-hl-top");
        }
        if self.high_win_rate {
            out.push("row-hl-win");
        }
        if self.pinned {
            out.push("row-pinned");
        }
        out
    }
}

pub fn classify(row: &StandingRow, pins: &PinSet) -> Badges {
    Badges {
        top3: row.is_top3(),
        high_win_rate: row.is_high_win_rate(),
        pinned: pins.contains(&row.player),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub player: String,
    pub badges: Badges,
    pub cells: [String; COLUMN_COUNT],
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    Rows(Vec<DisplayRow>),
    /// One row spanning every column.
    Placeholder(String),
}

pub fn display_row(row: &StandingRow, pins: &PinSet) -> DisplayRow {
    let badges = classify(row, pins);
    let mut player_cell = row.player.clone();
    let labels = badges.labels();
    if !labels.is_empty() {
        player_cell.push_str(&format!(" [{}]", labels.join("] [")));
    }

    DisplayRow {
        player: row.player.clone(),
        badges,
        cells: [
            (if badges.pinned { "📌" } else { "" }).to_string(),
            format_number(row.rank),
            player_cell,
            or_dash(row.model.as_deref()),
            or_dash(
                row.prompt
                    .as_deref()
                    .map(|p| truncate_text(p, PROMPT_DISPLAY_CHARS))
                    .as_deref(),
            ),
            format_number(row.rating_mu),
            format_number(row.rating_sigma),
            row.wins.to_string(),
            row.draws.to_string(),
            row.losses.to_string(),
            row.games.to_string(),
            format_percent(row.win_rate),
        ],
    }
}

pub fn build_table(rows: &[&StandingRow], pins: &PinSet) -> TableBody {
    TableBody::Rows(rows.iter().map(|row| display_row(row, pins)).collect())
}

pub fn load_failed_table() -> TableBody {
    TableBody::Placeholder(LOAD_FAILED_TEXT.to_string())
}

/// `0.853` -> `85.3%`. Expects a fraction.
pub fn format_percent(win_rate: Option<f64>) -> String {
    match win_rate {
        Some(v) if v.is_finite() => format!("{:.1}%", v * 100.0),
        _ => "–".to_string(),
    }
}

pub fn format_number(value: f64) -> String {
    if value.is_finite() {
        let text = format!("{value:.3}");
        let text = text.trim_end_matches('0').trim_end_matches('.');
        text.to_string()
    } else {
        "–".to_string()
    }
}

pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("héllo", 5), "héllo");
        assert_eq!(truncate_text("héllo wörld", 6), "héllo…");
        assert_eq!(truncate_text("héllo wörld", 6).chars().count(), 6);
    }

    #[test]
    fn numbers_drop_trailing_zeros() {
        assert_eq!(format_number(25.0), "25");
        assert_eq!(format_number(24.125), "24.125");
        assert_eq!(format_number(8.3333333), "8.333");
        assert_eq!(format_number(f64::NAN), "–");
    }

    #[test]
    fn classes_cover_every_badge() {
        let badges = Badges {
            top3: true,
            high_win_rate: false,
            pinned: true,
        };
        assert_eq!(badges.classes(), vec!["row-hl-top", "row-pinned"]);
        assert_eq!(badges.labels(), vec!["Top 3"]);
        assert!(Badges::default().classes().is_empty());
    }

    #[test]
    fn display_row_dashes_and_truncates() {
        let row = StandingRow {
            rank: 7.0,
            player: "zed".to_string(),
            model: None,
            prompt: Some("x".repeat(200)),
            rating_mu: 20.5,
            rating_sigma: f64::NAN,
            wins: 1,
            draws: 2,
            losses: 3,
            games: 6,
            win_rate: None,
        };
        let pins = PinSet::from_names(["zed"]);
        let out = display_row(&row, &pins);
        assert_eq!(out.cells[0], "📌");
        assert_eq!(out.cells[2], "zed");
        assert_eq!(out.cells[3], "—");
        assert_eq!(out.cells[4].chars().count(), PROMPT_DISPLAY_CHARS);
        assert!(out.cells[4].ends_with('…'));
        assert_eq!(out.cells[6], "–");
        assert_eq!(out.cells[11], "–");
        assert!(out.badges.pinned);
    }

    #[test]
    fn percent_formats_fraction() {
        assert_eq!(format_percent(Some(0.85)), "85.0%");
        assert_eq!(format_percent(None), "–");
    }
}
