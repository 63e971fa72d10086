//! Console echo with level-styled badges.
//!
//! Each line carries a badge pair, `[prefix][level] message`, styled through
//! a closed per-level mapping. Echo is independent of the persistence gates:
//! `record_logs` and `log_level` never suppress it, only `hide_console` does.

use colored::{ColoredString, Colorize};
use logbook_store::{LogLevel, LogRecord};

use crate::config::Config;

fn level_badge(level: LogLevel) -> ColoredString {
    let label = format!(" {level} ");
    match level {
        LogLevel::Log => label.black().on_green(),
        LogLevel::Info => label.black().on_blue(),
        LogLevel::Warn => label.black().on_yellow(),
        LogLevel::Error => label.white().on_red(),
    }
}

fn render_message(message: &serde_json::Value) -> String {
    message
        .as_str()
        .map_or_else(|| message.to_string(), ToString::to_string)
}

/// Writes one styled line for the record unless the config hides the console.
///
/// `log`/`info` go to stdout, `warn`/`error` to stderr.
pub(crate) fn echo(config: &Config, record: &LogRecord) {
    if config.hide_console {
        return;
    }

    let level = level_badge(record.level);
    let message = render_message(&record.message);
    let line = if config.hide_console_prefix {
        format!("{level} {message}")
    } else {
        let prefix = format!(" {} ", config.console_prefix)
            .white()
            .on_bright_black();
        format!("{prefix}{level} {message}")
    };

    match record.level {
        LogLevel::Log | LogLevel::Info => println!("{line}"),
        LogLevel::Warn | LogLevel::Error => eprintln!("{line}"),
    }
}
