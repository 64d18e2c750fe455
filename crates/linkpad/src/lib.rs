pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

use crate::infra::config::Config;

/// Install logging at the level configured, raised once per `-v`.
pub fn init(config: &Config, verbosity: u8) {
    infra::logging::init(infra::logging::level_for(config, verbosity));
    infra::logging::warn_on_unknown_level(config);
}
