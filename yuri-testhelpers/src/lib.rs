#![warn(missing_docs)]
#![forbid(unsafe_code)]
//! Test setup shared by the yuri crates.
//!
//! Call [`setup`] at the start of a test, or annotate the test with
//! [`#[yuri_testhelpers::test]`](test), which does it for you and lets the
//! body use `?`.

pub use color_eyre::eyre;
pub use yuri_testhelpers_macros::test;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::{OwoColorize, Style};
use regex::Regex;
use std::io::Write;
use std::sync::{LazyLock, Once};

/// Environment variable holding the maximum log level, e.g. `YURI_LOG=debug`.
pub const LOG_LEVEL_VAR: &str = "YURI_LOG";

/// Writes every record to stderr as `LEVEL target: message`.
struct StderrLogger {
    max: LevelFilter,
}

fn level_style(level: Level) -> Style {
    let style = Style::new();
    match level {
        Level::Error => style.red().bold(),
        Level::Warn => style.yellow(),
        Level::Info => style.green(),
        Level::Debug => style.blue(),
        Level::Trace => style.cyan().dimmed(),
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut err = std::io::stderr().lock();
        let _ = writeln!(
            err,
            "{:>5} {}: {}",
            record.level().style(level_style(record.level())),
            record.target().dimmed(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Level named by [`LOG_LEVEL_VAR`]; `Trace` when unset or unparsable.
fn max_level() -> LevelFilter {
    match std::env::var(LOG_LEVEL_VAR) {
        Ok(level) => level.parse().unwrap_or(LevelFilter::Trace),
        Err(_) => LevelFilter::Trace,
    }
}

/// Backtrace frames that belong to the panic machinery or the test harness.
static NOISE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(std::panic|core::panic|<core::panic::|std::sys::(pal|backtrace)",
        r"|std::thread::Builder|core::ops::function|test::run_test",
        r"|test::__rust_begin_short_backtrace|__pthread_cond_wait",
        r"|<alloc::boxed::Box<F,A> as core::ops::function::FnOnce<Args>>::call_once)"
    ))
    .ok()
});

fn is_noise(name: Option<&str>) -> bool {
    match (name, NOISE.as_ref()) {
        (Some(name), Some(re)) => re.is_match(name),
        _ => false,
    }
}

/// Installs a stderr logger plus color-eyre and color-backtrace hooks (the
/// latter two are skipped under miri). Only the first call has any effect.
pub fn setup() {
    static SETUP: Once = Once::new();
    SETUP.call_once(|| {
        #[cfg(not(miri))]
        install_hooks();

        let max = max_level();
        if log::set_boxed_logger(Box::new(StderrLogger { max })).is_ok() {
            log::set_max_level(max);
        }
    });
}

#[cfg(not(miri))]
fn install_hooks() {
    use color_backtrace::termcolor::{ColorChoice, StandardStream};

    // Another harness may already own the hook; keep theirs.
    let _ = color_eyre::config::HookBuilder::default()
        .add_frame_filter(Box::new(|frames: &mut Vec<&color_eyre::config::Frame>| {
            frames.retain(|frame| !is_noise(frame.name.as_deref()));
        }))
        .install();

    color_backtrace::BacktracePrinter::new()
        .add_frame_filter(Box::new(|frames: &mut Vec<&color_backtrace::Frame>| {
            frames.retain(|frame| !is_noise(frame.name.as_deref()));
        }))
        .install(Box::new(StandardStream::stderr(ColorChoice::Auto)));
}

#[cfg(test)]
mod tests {
    use super::{is_noise, setup};

    #[test]
    fn setup_is_idempotent() {
        setup();
        setup();
        log::debug!("still alive after two setups");
    }

    #[test]
    fn harness_frames_are_filtered() {
        assert!(is_noise(Some("std::panic::catch_unwind")));
        assert!(is_noise(Some("test::run_test::{{closure}}")));
        assert!(!is_noise(Some("yuri_json::deserialize::from_str")));
        assert!(!is_noise(None));
    }
}
