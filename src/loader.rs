use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use chrono::Local;

use crate::standings::load_standings;
use crate::state::Delta;

/// Loads the standings file off the UI thread and reports exactly one
/// `StandingsLoaded` or `LoadFailed` delta.
pub fn spawn_standings_loader(path: PathBuf, tx: Sender<Delta>) -> JoinHandle<()> {
    thread::spawn(move || {
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Loading standings from {}",
            path.display()
        )));
        let delta = load_delta(&path);
        let _ = tx.send(delta);
    })
}

pub fn load_delta(path: &std::path::Path) -> Delta {
    match load_standings(path) {
        Ok(rows) => Delta::StandingsLoaded {
            rows,
            loaded_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        },
        Err(err) => Delta::LoadFailed(format!("{err:#}")),
    }
}
