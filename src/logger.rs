use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};

/// Stdout backend for the `log` facade: `[timestamp][LEVEL][file:line] message`
struct StdoutLogger;

static LOGGER: StdoutLogger = StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file = record.file().unwrap_or("?");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        println!(
            "[{}][{}][{}:{}] {}",
            timestamp,
            record.level(),
            file_name,
            record.line().unwrap_or(0),
            record.args()
        );
    }

    fn flush(&self) {}
}

/// Parse a level name ("off", "error", "warn", "info", "debug", "trace")
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.parse().ok()
}

/// Install the logger. Calling it again only changes the level.
pub fn init(level: LevelFilter) {
    // Already installed is fine
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
