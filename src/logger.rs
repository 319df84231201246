use log::{LevelFilter, SetLoggerError};

pub struct Logger;

impl Logger {
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger(&Logger).map(|()| log::set_max_level(level))
    }
}

// stdout carries the table and the commands, so everything logged goes to stderr.
impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            match record.level() {
                log::Level::Error | log::Level::Warn => eprintln!(
                    "{}: {}",
                    record.level().as_str().to_lowercase(),
                    record.args()
                ),
                _ => eprintln!("{}", record.args()),
            };
        }
    }

    fn flush(&self) {}
}
