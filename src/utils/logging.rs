use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Maps a config level name onto a filter, falling back to `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().parse::<LevelFilter>() {
        Ok(filter) => filter,
        Err(_) => {
            eprintln!("Unknown log level '{}', using 'info'", level);
            LevelFilter::Info
        }
    }
}

/// Installs the global logger. Must run once, before anything logs.
pub fn init_logging(level: &str) -> Result<(), log::SetLoggerError> {
    SimpleLogger::new()
        .with_level(parse_level(level))
        .init()?;
    log::debug!("Logging initialized at {}", level);
    Ok(())
}
