pub mod charts;
pub mod config;
pub mod debounce;
pub mod loader;
pub mod pins;
pub mod pipeline;
pub mod standings;
pub mod state;
pub mod store;
pub mod table;
pub mod theme;
