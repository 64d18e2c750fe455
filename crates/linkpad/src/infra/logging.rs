//! Tracing subscriber setup.

use std::str::FromStr;

use tracing::level_filters::LevelFilter;

use crate::infra::config::Config;

/// Resolve the level to log at from configuration and `-v` flags.
///
/// Each verbosity step raises the configured level by one; unknown level names
/// fall back to `warn`.
pub fn level_for(config: &Config, verbosity: u8) -> LevelFilter {
    let configured = configured_level(config).unwrap_or(LevelFilter::WARN);
    (0..verbosity).fold(configured, |level, _| raise(level))
}

fn configured_level(config: &Config) -> Option<LevelFilter> {
    LevelFilter::from_str(config.defaults.log_level().trim()).ok()
}

/// Emit a warning through the active subscriber when the configured level name is unknown.
pub fn warn_on_unknown_level(config: &Config) {
    if configured_level(config).is_none() {
        tracing::warn!(
            level = config.defaults.log_level(),
            "unknown log level, using warn"
        );
    }
}

const LADDER: [LevelFilter; 6] = [
    LevelFilter::OFF,
    LevelFilter::ERROR,
    LevelFilter::WARN,
    LevelFilter::INFO,
    LevelFilter::DEBUG,
    LevelFilter::TRACE,
];

fn raise(level: LevelFilter) -> LevelFilter {
    let step = LADDER
        .iter()
        .position(|candidate| *candidate == level)
        .map_or(LADDER.len() - 1, |index| index + 1);
    LADDER[step.min(LADDER.len() - 1)]
}

/// Install a stderr fmt subscriber. Later calls are no-ops.
pub fn init(level: LevelFilter) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Run `f` under a scoped subscriber and return everything it logged at `warn` and above.
#[cfg(test)]
pub(crate) fn capture_logs(f: impl FnOnce()) -> String {
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("capture lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::WARN)
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let bytes = captured.0.lock().expect("capture lock");
    String::from_utf8_lossy(&bytes).into_owned()
}
