use std::io::Write;

use colored::Colorize;
use env_logger::Builder;
use log::Level;

/// Single-line coloured output, level taken from `RUST_LOG` (default `info`).
pub fn init_logger() {
    let _ = builder().try_init();
}

fn builder() -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| {
            let level = match record.level() {
                Level::Error => "ERROR".red().bold(),
                Level::Warn => "WARN".yellow().bold(),
                Level::Info => "INFO".green().bold(),
                Level::Debug => "DEBUG".blue().bold(),
                Level::Trace => "TRACE".magenta().bold(),
            };
            writeln!(buf, "{} [{}] {}", level, record.target(), record.args())
        });
    builder
}
