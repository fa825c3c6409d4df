use std::cmp::Ordering;
use std::collections::HashMap;

use crate::pins::PinSet;
use crate::standings::StandingRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFields {
    pub model: bool,
    pub prompt: bool,
}

impl Default for SearchFields {
    fn default() -> Self {
        Self {
            model: true,
            prompt: true,
        }
    }
}

impl SearchFields {
    pub fn player_only() -> Self {
        Self {
            model: false,
            prompt: false,
        }
    }

    /// Parse a comma list such as `player,model`. Player is always searched;
    /// unknown names are ignored.
    pub fn parse(raw: &str) -> Self {
        let mut fields = Self::player_only();
        for part in raw.split([',', ';', ' ']) {
            match part.trim().to_ascii_lowercase().as_str() {
                "model" => fields.model = true,
                "prompt" => fields.prompt = true,
                _ => {}
            }
        }
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Rank,
    Player,
    Model,
    Prompt,
    RatingMu,
    RatingSigma,
    Wins,
    Draws,
    Losses,
    Games,
    WinRate,
}

impl SortKey {
    pub fn column(self) -> &'static str {
        match self {
            SortKey::Rank => "Rank",
            SortKey::Player => "Player",
            SortKey::Model => "Model",
            SortKey::Prompt => "Prompt",
            SortKey::RatingMu => "Rating_Mu",
            SortKey::RatingSigma => "Rating_Sigma",
            SortKey::Wins => "Wins",
            SortKey::Draws => "Draws",
            SortKey::Losses => "Losses",
            SortKey::Games => "Games",
            SortKey::WinRate => "Win_Rate",
        }
    }

    pub fn from_column(name: &str) -> Option<Self> {
        const ALL: [SortKey; 11] = [
            SortKey::Rank,
            SortKey::Player,
            SortKey::Model,
            SortKey::Prompt,
            SortKey::RatingMu,
            SortKey::RatingSigma,
            SortKey::Wins,
            SortKey::Draws,
            SortKey::Losses,
            SortKey::Games,
            SortKey::WinRate,
        ];
        let name = name.trim();
        ALL.into_iter()
            .find(|key| key.column().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub descending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::asc(SortKey::Rank)
    }
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            descending: false,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            descending: true,
        }
    }

    /// Selector syntax: a column name, `-` prefix for descending.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match raw.strip_prefix('-') {
            Some(rest) => SortKey::from_column(rest).map(Self::desc),
            None => SortKey::from_column(raw).map(Self::asc),
        }
    }

    pub fn reversed(self) -> Self {
        Self {
            key: self.key,
            descending: !self.descending,
        }
    }

    pub fn label(self) -> String {
        let arrow = if self.descending { "↓" } else { "↑" };
        format!("{} {arrow}", self.key.column())
    }
}

/// Sort presets cycled from the keyboard.
pub const SORT_PRESETS: [SortSpec; 6] = [
    SortSpec {
        key: SortKey::Rank,
        descending: false,
    },
    SortSpec {
        key: SortKey::RatingMu,
        descending: true,
    },
    SortSpec {
        key: SortKey::WinRate,
        descending: true,
    },
    SortSpec {
        key: SortKey::Wins,
        descending: true,
    },
    SortSpec {
        key: SortKey::Games,
        descending: true,
    },
    SortSpec {
        key: SortKey::Player,
        descending: false,
    },
];

pub fn filter_rows<'a>(
    rows: &'a [StandingRow],
    query: &str,
    fields: SearchFields,
) -> Vec<&'a StandingRow> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return rows.iter().collect();
    }
    rows.iter()
        .filter(|row| {
            row.player.to_lowercase().contains(&query)
                || (fields.model && contains_ci(row.model.as_deref(), &query))
                || (fields.prompt && contains_ci(row.prompt.as_deref(), &query))
        })
        .collect()
}

fn contains_ci(value: Option<&str>, lowered_query: &str) -> bool {
    value.is_some_and(|v| v.to_lowercase().contains(lowered_query))
}

/// Stable sort; ties keep their input order in either direction.
pub fn sort_rows(rows: &mut [&StandingRow], spec: SortSpec) {
    rows.sort_by(|a, b| {
        let ord = compare_by_key(a, b, spec.key);
        if spec.descending { ord.reverse() } else { ord }
    });
}

fn compare_by_key(a: &StandingRow, b: &StandingRow, key: SortKey) -> Ordering {
    match key {
        SortKey::Rank => a.rank.total_cmp(&b.rank),
        SortKey::Player => a.player.cmp(&b.player),
        SortKey::Model => a.model.cmp(&b.model),
        SortKey::Prompt => a.prompt.cmp(&b.prompt),
        SortKey::RatingMu => a.rating_mu.total_cmp(&b.rating_mu),
        SortKey::RatingSigma => a.rating_sigma.total_cmp(&b.rating_sigma),
        SortKey::Wins => a.wins.cmp(&b.wins),
        SortKey::Draws => a.draws.cmp(&b.draws),
        SortKey::Losses => a.losses.cmp(&b.losses),
        SortKey::Games => a.games.cmp(&b.games),
        SortKey::WinRate => match (a.win_rate, b.win_rate) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (x, y) => x.is_some().cmp(&y.is_some()),
        },
    }
}

/// Float pinned rows to the top in pin order; everything else keeps the
/// order it arrived in.
pub fn apply_pin_order<'a>(rows: Vec<&'a StandingRow>, pins: &PinSet) -> Vec<&'a StandingRow> {
    if pins.is_empty() {
        return rows;
    }
    let positions: HashMap<&str, usize> = pins
        .iter()
        .enumerate()
        .map(|(idx, name)| (name, idx))
        .collect();

    let (mut pinned, unpinned): (Vec<_>, Vec<_>) = rows
        .into_iter()
        .partition(|row| positions.contains_key(row.player.as_str()));
    pinned.sort_by_key(|row| positions.get(row.player.as_str()).copied().unwrap_or(usize::MAX));
    pinned.extend(unpinned);
    pinned
}

/// Search, sort and pin overlay in one pass over the canonical rows.
pub fn ranked_view<'a>(
    rows: &'a [StandingRow],
    query: &str,
    fields: SearchFields,
    sort: SortSpec,
    pins: &PinSet,
) -> Vec<&'a StandingRow> {
    let mut view = filter_rows(rows, query, fields);
    sort_rows(&mut view, sort);
    apply_pin_order(view, pins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_spec_parses_selector_syntax() {
        assert_eq!(SortSpec::parse("Rank"), Some(SortSpec::asc(SortKey::Rank)));
        assert_eq!(
            SortSpec::parse("-Rating_Mu"),
            Some(SortSpec::desc(SortKey::RatingMu))
        );
        assert_eq!(
            SortSpec::parse("win_rate"),
            Some(SortSpec::asc(SortKey::WinRate))
        );
        assert_eq!(SortSpec::parse("-Elo"), None);
    }

    #[test]
    fn search_fields_parse_keeps_player() {
        let fields = SearchFields::parse("player, model");
        assert!(fields.model);
        assert!(!fields.prompt);
        assert_eq!(SearchFields::parse(""), SearchFields::player_only());
    }
}
