use crate::standings::StandingRow;

pub const RATING_BINS: usize = 10;

/// Win rate per player, in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct WinRateSeries {
    pub labels: Vec<String>,
    pub percents: Vec<f64>,
}

impl WinRateSeries {
    pub fn tooltip(&self, idx: usize) -> Option<String> {
        self.percents.get(idx).map(|p| format!("{p:.1}%"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RatingHistogram {
    pub counts: Vec<u64>,
    pub labels: Vec<String>,
    pub min: f64,
    pub width: f64,
}

impl RatingHistogram {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WdlSeries {
    pub labels: Vec<String>,
    pub wins: Vec<u32>,
    pub draws: Vec<u32>,
    pub losses: Vec<u32>,
}

impl WdlSeries {
    /// Per-row `[wins, draws, losses]` widths in cells, scaled so the largest
    /// row total fills `bar_space`. Segment edges are rounded, not segments,
    /// so a row never exceeds `bar_space`.
    pub fn bar_widths(&self, bar_space: usize) -> Vec<[usize; 3]> {
        let len = self.wins.len().min(self.draws.len()).min(self.losses.len());
        let edges = |idx: usize| {
            let wins = u64::from(self.wins[idx]);
            let draws = wins + u64::from(self.draws[idx]);
            [wins, draws, draws + u64::from(self.losses[idx])]
        };
        let max_total = (0..len)
            .map(|idx| edges(idx)[2])
            .max()
            .unwrap_or(0)
            .max(1);
        let space = bar_space as u64;
        let scale = |n: u64| {
            let cells = (n.saturating_mul(space) + max_total / 2) / max_total;
            cells.min(space) as usize
        };

        (0..len)
            .map(|idx| {
                let [w, d, l] = edges(idx).map(scale);
                [w, d - w, l - d]
            })
            .collect()
    }
}

pub fn build_win_rate_series(rows: &[&StandingRow]) -> WinRateSeries {
    WinRateSeries {
        labels: rows.iter().map(|r| r.player.clone()).collect(),
        percents: rows
            .iter()
            .map(|r| r.win_rate.unwrap_or(0.0) * 100.0)
            .collect(),
    }
}

/// Uniform histogram of finite values. `None` when nothing is finite.
pub fn bin_values(values: impl IntoIterator<Item = f64>, bins: usize) -> Option<RatingHistogram> {
    let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if values.is_empty() || bins == 0 {
        return None;
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut width = (max - min) / bins as f64;
    if width == 0.0 || !width.is_finite() {
        width = 1.0;
    }

    let mut counts = vec![0u64; bins];
    for v in &values {
        let idx = ((v - min) / width).floor();
        let idx = if idx.is_finite() && idx > 0.0 {
            (idx as usize).min(bins - 1)
        } else {
            0
        };
        counts[idx] += 1;
    }

    let labels = (0..bins)
        .map(|i| {
            let lower = min + i as f64 * width;
            let upper = min + (i + 1) as f64 * width;
            format!("{lower:.1}–{upper:.1}")
        })
        .collect();

    Some(RatingHistogram {
        counts,
        labels,
        min,
        width,
    })
}

pub fn build_rating_histogram(rows: &[&StandingRow]) -> Option<RatingHistogram> {
    bin_values(rows.iter().map(|r| r.rating_mu), RATING_BINS)
}

pub fn build_wdl_series(rows: &[&StandingRow]) -> WdlSeries {
    WdlSeries {
        labels: rows.iter().map(|r| r.player.clone()).collect(),
        wins: rows.iter().map(|r| r.wins).collect(),
        draws: rows.iter().map(|r| r.draws).collect(),
        losses: rows.iter().map(|r| r.losses).collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub win_rate: WinRateSeries,
    pub rating: Option<RatingHistogram>,
    pub wdl: WdlSeries,
}

impl ChartSet {
    pub fn build(rows: &[&StandingRow]) -> Self {
        Self {
            win_rate: build_win_rate_series(rows),
            rating: build_rating_histogram(rows),
            wdl: build_wdl_series(rows),
        }
    }
}

/// Owns the current chart set. A rebuild drops the old set before the new one
/// is created.
#[derive(Debug, Clone, Default)]
pub struct ChartPanel {
    current: Option<ChartSet>,
    generation: u64,
}

impl ChartPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rebuild(&mut self, rows: &[&StandingRow]) {
        drop(self.current.take());
        self.current = Some(ChartSet::build(rows));
        self.generation += 1;
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ChartSet> {
        self.current.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
