use colored::Colorize;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

pub fn init_colors() {
    if std::env::var_os("NO_COLOR").is_some() || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Cancellation is a process-wide flag, checked between pipeline stages.
/// In-flight fetches are never torn down mid-request.
pub fn mark_interrupted() {
    INTERRUPTED.store(true, Ordering::Relaxed);
}

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::Relaxed)
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Success,
    Warn,
    Error,
}

/// Output sink for the command pipelines. Commands never print directly, so
/// tests can capture every line without touching process-global state.
pub trait Reporter: Send + Sync {
    fn emit(&self, level: Level, msg: &str);
}

/// Default sink: colored terminal output, honoring `--quiet`/`--verbose`.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn emit(&self, level: Level, msg: &str) {
        match level {
            Level::Debug => {
                if is_verbose() {
                    println!("{} {}", "·".bright_black(), msg.bright_black());
                }
            }
            Level::Info => {
                if !is_quiet() {
                    info(msg);
                }
            }
            Level::Success => {
                if !is_quiet() {
                    success(msg);
                }
            }
            Level::Warn => warning(msg),
            Level::Error => error(msg),
        }
    }
}

/// Capturing sink used by the test suites.
#[derive(Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|(_, msg)| msg.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn emit(&self, level: Level, msg: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push((level, msg.to_string()));
        }
    }
}
