pub mod config;
pub mod playlist;
pub mod run;

pub use config::{init_config, show_config};
pub use playlist::build_playlist;
pub use run::run_match;
