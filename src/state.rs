use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::charts::ChartPanel;
use crate::config::DEFAULT_DEBOUNCE_MS;
use crate::debounce::Debouncer;
use crate::pins::PinSet;
use crate::pipeline::{SORT_PRESETS, SearchFields, SortSpec, ranked_view};
use crate::standings::StandingRow;
use crate::store::KeyValueStore;
use crate::table::{TableBody, build_table, load_failed_table};
use crate::theme::Theme;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Leaderboard,
    /// Keyed by player name, the same identifier a detail link would carry.
    PlayerDetail { player: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded { loaded_at: String },
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum Delta {
    StandingsLoaded {
        rows: Vec<StandingRow>,
        loaded_at: String,
    },
    LoadFailed(String),
    Log(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub load: LoadState,
    pub rows: Vec<StandingRow>,
    pub search: String,
    pub search_active: bool,
    pub applied_query: String,
    pub search_fields: SearchFields,
    pub search_debounce: Debouncer,
    pub sort: SortSpec,
    pub sort_preset: usize,
    pub pins: PinSet,
    pub theme: Theme,
    pub view: Vec<StandingRow>,
    pub table: TableBody,
    pub charts: ChartPanel,
    pub selected: usize,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Leaderboard,
            load: LoadState::Loading,
            rows: Vec::new(),
            search: String::new(),
            search_active: false,
            applied_query: String::new(),
            search_fields: SearchFields::default(),
            search_debounce: Debouncer::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS)),
            sort: SORT_PRESETS[0],
            sort_preset: 0,
            pins: PinSet::new(),
            theme: Theme::default(),
            view: Vec::new(),
            table: TableBody::Rows(Vec::new()),
            charts: ChartPanel::new(),
            selected: 0,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
        }
    }

    pub fn with_search(mut self, fields: SearchFields, debounce: Duration) -> Self {
        self.search_fields = fields;
        self.search_debounce = Debouncer::new(debounce);
        self
    }

    /// Restores pins and theme saved by a previous session.
    pub fn load_preferences(&mut self, store: &dyn KeyValueStore) {
        self.pins = PinSet::load(store);
        self.theme = Theme::load(store);
        if !self.pins.is_empty() {
            self.push_log(format!("[INFO] Restored {} pinned players", self.pins.len()));
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    /// Rebuilds view, table and charts from the canonical rows and the
    /// current controls. Selection follows the previously selected player.
    pub fn recompute(&mut self) {
        let selected_player = self.selected_row().map(|r| r.player.clone());

        if let LoadState::Failed(_) = self.load {
            self.view.clear();
            self.table = load_failed_table();
            self.charts.clear();
            self.selected = 0;
            return;
        }

        let view = ranked_view(
            &self.rows,
            &self.applied_query,
            self.search_fields,
            self.sort,
            &self.pins,
        );
        self.table = build_table(&view, &self.pins);
        self.charts.rebuild(&view);
        self.view = view.into_iter().cloned().collect();

        if let Some(player) = selected_player
            && let Some(pos) = self.view.iter().position(|r| r.player == player)
        {
            self.selected = pos;
            return;
        }
        self.clamp_selection();
    }

    pub fn selected_row(&self) -> Option<&StandingRow> {
        self.view.get(self.selected)
    }

    pub fn begin_search(&mut self) {
        self.search_active = true;
    }

    pub fn end_search(&mut self) {
        self.search_active = false;
    }

    pub fn search_push(&mut self, ch: char, now: Instant) {
        self.search.push(ch);
        self.search_debounce.schedule(now);
    }

    pub fn search_backspace(&mut self, now: Instant) {
        if self.search.pop().is_some() {
            self.search_debounce.schedule(now);
        }
    }

    pub fn clear_search(&mut self, now: Instant) {
        if !self.search.is_empty() {
            self.search.clear();
            self.search_debounce.schedule(now);
        }
    }

    /// Applies a debounced search once its quiet period has passed. Returns
    /// true when the view was recomputed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.search_debounce.fire_if_due(now) {
            return false;
        }
        if self.applied_query == self.search {
            return false;
        }
        self.applied_query = self.search.clone();
        self.recompute();
        self.selected = 0;
        true
    }

    pub fn cycle_sort(&mut self) {
        self.sort_preset = (self.sort_preset + 1) % SORT_PRESETS.len();
        self.sort = SORT_PRESETS[self.sort_preset];
        self.recompute();
    }

    pub fn reverse_sort(&mut self) {
        self.sort = self.sort.reversed();
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        if let Some(idx) = SORT_PRESETS.iter().position(|p| *p == sort) {
            self.sort_preset = idx;
        }
        self.recompute();
    }

    pub fn toggle_pin(&mut self, player: &str, store: &mut dyn KeyValueStore) {
        let pinned = self.pins.toggle(player);
        if let Err(err) = self.pins.save(store) {
            self.push_log(format!("[WARN] Saving pins failed: {err:#}"));
        }
        let verb = if pinned { "Pinned" } else { "Unpinned" };
        self.push_log(format!("[INFO] {verb} {player}"));
        self.recompute();
    }

    /// Pins the player on screen: the detail player when one is open,
    /// otherwise the selected table row.
    pub fn toggle_pin_current(&mut self, store: &mut dyn KeyValueStore) {
        let player = match &self.screen {
            Screen::PlayerDetail { player } => Some(player.clone()),
            Screen::Leaderboard => self.selected_row().map(|r| r.player.clone()),
        };
        let Some(player) = player else {
            self.push_log("[INFO] No player selected");
            return;
        };
        self.toggle_pin(&player, store);
    }

    pub fn toggle_theme(&mut self, store: &mut dyn KeyValueStore) {
        self.theme = self.theme.toggled();
        if let Err(err) = self.theme.save(store) {
            self.push_log(format!("[WARN] Saving theme failed: {err:#}"));
        }
    }

    pub fn open_selected_player(&mut self) {
        if let Some(player) = self.selected_row().map(|r| r.player.clone()) {
            self.screen = Screen::PlayerDetail { player };
        }
    }

    pub fn back(&mut self) {
        self.screen = Screen::Leaderboard;
    }

    /// Looks the player up in the full row set, so the detail stays valid even
    /// if a later search hides the row.
    pub fn player_detail(&self) -> Option<&StandingRow> {
        match &self.screen {
            Screen::PlayerDetail { player } => self.rows.iter().find(|r| &r.player == player),
            Screen::Leaderboard => None,
        }
    }

    pub fn select_next(&mut self) {
        let total = self.view.len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.view.len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        let total = self.view.len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::StandingsLoaded { rows, loaded_at } => {
            state.push_log(format!("[INFO] Loaded {} standings rows", rows.len()));
            state.rows = rows;
            state.load = LoadState::Loaded { loaded_at };
            state.selected = 0;
            state.recompute();
        }
        Delta::LoadFailed(err) => {
            state.push_log(format!("[ERROR] Failed to load CSV: {err}"));
            state.rows.clear();
            state.load = LoadState::Failed(err);
            state.recompute();
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

pub fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "LIGHT",
        Theme::Dark => "DARK",
    }
}
