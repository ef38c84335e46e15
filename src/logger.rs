use slog::{Drain, Level, o};
use slog_atomic::{AtomicSwitch, AtomicSwitchCtrl};
use std::sync::Mutex;

/// Terminal logger with a runtime-swappable level, for CLI collaborators
/// to install before driving the codec
pub struct Logger {
    root: slog::Logger,
    ctrl: AtomicSwitchCtrl,
}

fn verbosity_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::Critical,
        1 => Level::Error,
        2 => Level::Warning,
        3 => Level::Info,
        4 => Level::Debug,
        _ => Level::Trace,
    }
}

fn term_drain(level: Level) -> AtomicSwitch {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator)
        .build()
        .filter_level(level)
        .fuse();
    AtomicSwitch::new(Mutex::new(drain).fuse())
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Logger {
    /// Verbosity maps 0 to critical through 5 and above to trace
    pub fn new(verbosity: u8) -> Self {
        let drain = term_drain(verbosity_level(verbosity));
        let ctrl = drain.ctrl();
        let root = slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")));
        Logger { root, ctrl }
    }

    /// Install as the process-wide logger and bridge the `log` facade so
    /// this crate's log macros route through it
    pub fn set_global(&self) -> &Self {
        let guard = slog_scope::set_global_logger(self.root.clone());
        // https://github.com/slog-rs/slog/issues/249
        guard.cancel_reset();
        slog_stdlog::init().ok();
        self
    }

    /// Swap the drain for one at a new verbosity without re-installing
    pub fn set_verbosity(&self, verbosity: u8) -> &Self {
        self.ctrl.set(term_drain(verbosity_level(verbosity)));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_swaps_do_not_disturb_the_root() {
        let logger = Logger::new(4);
        logger.set_verbosity(0);
        logger.set_verbosity(5);
        slog::info!(logger.root, "still alive");
    }
}
