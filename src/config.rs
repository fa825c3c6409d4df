use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::pipeline::SearchFields;
use crate::standings::DEFAULT_STANDINGS_PATH;

pub const DEFAULT_DEBOUNCE_MS: u64 = 100;
const MAX_DEBOUNCE_MS: u64 = 2000;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub standings_path: PathBuf,
    pub search_debounce: Duration,
    pub search_fields: SearchFields,
    pub state_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            standings_path: PathBuf::from(DEFAULT_STANDINGS_PATH),
            search_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            search_fields: SearchFields::default(),
            state_dir: None,
        }
    }
}

impl Config {
    /// CLI path wins over `STANDINGS_CSV`. Call after the dotenv files are
    /// loaded.
    pub fn from_env(cli_path: Option<String>) -> Self {
        Self::from_lookup(cli_path, |key| env::var(key).ok())
    }

    pub fn from_lookup(cli_path: Option<String>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let standings_path = cli_path
            .or_else(|| lookup("STANDINGS_CSV"))
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STANDINGS_PATH));
        let debounce_ms = lookup("SEARCH_DEBOUNCE_MS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_DEBOUNCE_MS)
            .min(MAX_DEBOUNCE_MS);
        let search_fields = lookup("SEARCH_FIELDS")
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| SearchFields::parse(&raw))
            .unwrap_or_default();
        let state_dir = lookup("LEADERBOARD_STATE_DIR")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Self {
            standings_path,
            search_debounce: Duration::from_millis(debounce_ms),
            search_fields,
            state_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = Config::from_lookup(None, lookup_from(&[]));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn cli_path_beats_env_and_debounce_is_clamped() {
        let cfg = Config::from_lookup(
            Some("cli.csv".to_string()),
            lookup_from(&[
                ("STANDINGS_CSV", "env.csv"),
                ("SEARCH_DEBOUNCE_MS", "99999"),
                ("SEARCH_FIELDS", "player"),
            ]),
        );
        assert_eq!(cfg.standings_path, PathBuf::from("cli.csv"));
        assert_eq!(cfg.search_debounce, Duration::from_millis(MAX_DEBOUNCE_MS));
        assert_eq!(cfg.search_fields, SearchFields::player_only());
    }
}
