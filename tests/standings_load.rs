use std::path::PathBuf;

use leaderboard_terminal::standings::{load_standings, parse_standings_str};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

#[test]
fn loads_fixture_and_drops_malformed_rows() {
    let rows = load_standings(&fixture_path("final_standings.csv")).expect("fixture should load");
    let players: Vec<&str> = rows.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(players, vec!["alice", "Bob", "carol", "Dave", "erin"]);
}

#[test]
fn win_rate_is_a_fraction_after_load() {
    let rows = load_standings(&fixture_path("final_standings.csv")).expect("fixture should load");
    for row in &rows {
        let wr = row.win_rate.expect("fixture rows all carry a win rate");
        assert!((0.0..=1.0).contains(&wr), "{} has {wr}", row.player);
    }
    assert_eq!(rows[0].win_rate, Some(0.85));
    assert_eq!(rows[1].win_rate, Some(0.6));
    assert_eq!(rows[2].win_rate, Some(0.5));
}

#[test]
fn empty_optional_cells_become_none() {
    let rows = load_standings(&fixture_path("final_standings.csv")).expect("fixture should load");
    let carol = rows.iter().find(|r| r.player == "carol").unwrap();
    assert!(carol.prompt.is_none());
    let dave = rows.iter().find(|r| r.player == "Dave").unwrap();
    assert!(dave.model.is_none());
    assert_eq!(
        rows[0].prompt.as_deref(),
        Some("Play aggressively, trade queens early")
    );
}

#[test]
fn numeric_ranks_survive_even_when_unusual() {
    let rows = parse_standings_str("Rank,Player\n-1,neg\n2.5,frac\n1,ok\nx,bad\n")
        .expect("should parse");
    let players: Vec<&str> = rows.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(players, vec!["neg", "frac", "ok"]);
    assert_eq!(rows[0].rank, -1.0);
    assert_eq!(rows[1].rank, 2.5);
}

#[test]
fn missing_file_is_an_error() {
    let err = load_standings(&fixture_path("does_not_exist.csv")).unwrap_err();
    assert!(format!("{err:#}").contains("does_not_exist.csv"));
}

#[test]
fn non_numeric_ratings_are_kept_as_nan() {
    let raw = "Rank,Player,Rating_Mu,Win_Rate\n1,A,abc,\n2,B,12.5,0.3\n";
    let rows = parse_standings_str(raw).expect("should parse");
    assert_eq!(rows.len(), 2);
    assert!(rows[0].rating_mu.is_nan());
    assert_eq!(rows[0].win_rate, None);
    assert_eq!(rows[1].rating_mu, 12.5);
    assert_eq!(rows[1].wins, 0);
}

#[test]
fn header_only_file_is_empty() {
    let raw = "Rank,Player,Model,Prompt,Rating_Mu,Rating_Sigma,Wins,Draws,Losses,Games,Win_Rate\n";
    assert!(parse_standings_str(raw).expect("should parse").is_empty());
}
