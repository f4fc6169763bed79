
//! Logger configuration for the server binary.

use log::LevelFilter;

use std::time::SystemTime;

pub fn init_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
  let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
  fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "[{} {} {}] {}",
        humantime::format_rfc3339_seconds(SystemTime::now()),
        record.level(),
        record.target(),
        message,
      ))
    })
    .level(level)
    .chain(std::io::stdout())
    .apply()
}
