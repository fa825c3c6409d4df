use leaderboard_terminal::standings::StandingRow;

pub fn row(rank: u32, player: &str, rating_mu: f64, win_rate: f64) -> StandingRow {
    StandingRow {
        rank: f64::from(rank),
        player: player.to_string(),
        model: None,
        prompt: None,
        rating_mu,
        rating_sigma: 1.0,
        wins: 0,
        draws: 0,
        losses: 0,
        games: 0,
        win_rate: Some(win_rate),
    }
}

pub fn players<'a>(rows: &[&'a StandingRow]) -> Vec<&'a str> {
    rows.iter().map(|r| r.player.as_str()).collect()
}

pub fn sample_rows() -> Vec<StandingRow> {
    let mut rows = vec![
        row(1, "alice", 31.0, 0.85),
        row(2, "Bob", 29.5, 0.60),
        row(3, "carol", 27.0, 0.50),
        row(4, "Dave", 25.5, 0.40),
        row(5, "erin", 22.0, 0.25),
    ];
    rows[0].model = Some("gpt-4o".to_string());
    rows[1].model = Some("claude-3".to_string());
    rows[2].prompt = Some("Play the Sicilian".to_string());
    rows[4].model = Some("GPT-4o-mini".to_string());
    rows
}
