use chrono::SecondsFormat;
use log::LevelFilter;

/// Initialize logging for the application.
///
/// Should be called once at the start of `main()`. Records go to stderr as
/// `<timestamp>  <LEVEL> <message>`.
///
/// # Errors
///
/// Returns an error if a global logger is already installed.
pub fn init_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}  {} {}",
                chrono::Local::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                record.level(),
                message
            ));
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}

/// Log level helper to determine if debug logging is enabled
#[must_use]
pub fn is_debug_enabled() -> bool {
    log::log_enabled!(log::Level::Debug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        // Only this test installs a logger in the unit test binary. `Off` keeps
        // the other tests' log lines out of the output.
        init_logging(LevelFilter::Off).expect("first init should succeed");
        assert!(!is_debug_enabled());
        assert!(init_logging(LevelFilter::Debug).is_err());
    }
}
