use std::io::Write;
use std::sync::OnceLock;
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    Stdout,
    /// Keeps stdout free for the rendered board in the console client.
    Stderr,
}

pub struct Logger {
    prefix: Option<String>,
    sink: LogSink,
}

impl Logger {
    fn new(prefix: Option<String>, sink: LogSink) -> Self {
        Self { prefix, sink }
    }

    fn format_line(&self, file: &str, line: u32, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        match self.prefix {
            Some(ref prefix) => format!("[{}][{}][{}:{}] {}", timestamp, prefix, file_name, line, message),
            None => format!("[{}][{}:{}] {}", timestamp, file_name, line, message),
        }
    }

    pub fn log(&self, file: &str, line: u32, message: &str) {
        let formatted = self.format_line(file, line, message);
        let _ = match self.sink {
            LogSink::Stdout => writeln!(std::io::stdout(), "{}", formatted),
            LogSink::Stderr => writeln!(std::io::stderr(), "{}", formatted),
        };
    }
}

pub fn init_logger(prefix: Option<String>) {
    init_logger_with_sink(prefix, LogSink::Stdout);
}

pub fn init_logger_with_sink(prefix: Option<String>, sink: LogSink) {
    LOGGER.get_or_init(|| Logger::new(prefix, sink));
}

pub fn log(file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(file, line, message);
    } else {
        eprintln!("[{}:{}] {}", file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(file!(), line!(), &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_carries_prefix_and_file_name() {
        let logger = Logger::new(Some("sos".to_string()), LogSink::Stderr);
        let line = logger.format_line("common/src/games/sos/controller.rs", 42, "hello");
        assert!(line.ends_with("[sos][controller.rs:42] hello"));
    }

    #[test]
    fn test_line_without_prefix() {
        let logger = Logger::new(None, LogSink::Stdout);
        let line = logger.format_line("C:\\src\\main.rs", 7, "started");
        assert!(line.ends_with("[main.rs:7] started"));
    }
}
