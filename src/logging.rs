use colored::{ColoredString, Colorize};
use env_logger::{Builder, Env};
use log::Level;
use std::io::Write;
use std::time::Duration;

/// Installs the terminal logger. `RUST_LOG` takes precedence; otherwise `info`
/// is used, or `warn` when `quiet` is set.
pub fn init_logging(quiet: bool) {
    let default_level = match quiet {
        true => "warn",
        false => "info",
    };
    let logging_env = Env::default().filter_or("RUST_LOG", default_level);
    Builder::from_env(logging_env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} {}",
                chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
                level_label(record.level()),
                record.args()
            )
        })
        .init();
}

fn level_label(level: Level) -> ColoredString {
    match level {
        Level::Error => "error".bold().red(),
        Level::Warn => "warn".bold().yellow(),
        Level::Info => "quire".bold().bright_yellow(),
        _ => "debug".dimmed(),
    }
}

/// Formats a build duration for the summary line: whole seconds once past a
/// second, milliseconds otherwise.
pub fn format_elapsed_time(elapsed: Duration) -> ColoredString {
    match elapsed.as_secs() {
        secs if secs > 2 => format!("{}s", secs).red(),
        secs if secs > 0 => format!("{}s", secs).yellow(),
        _ => match elapsed.as_millis() {
            millis if millis > 500 => format!("{}ms", millis).yellow(),
            millis if millis > 0 => format!("{}ms", millis).normal(),
            _ => format!("{}μs", elapsed.as_micros()).normal(),
        },
    }
}
