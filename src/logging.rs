use log::{LevelFilter, Log, Metadata, Record};
use std::sync::OnceLock;

static LOGGER: CoreLogger = CoreLogger;
static INSTALLED: OnceLock<bool> = OnceLock::new();

struct CoreLogger;

impl Log for CoreLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        write_line(record.level(), &line);
    }

    fn flush(&self) {}
}

#[cfg(target_os = "android")]
fn write_line(level: log::Level, msg: &str) {
    use std::ffi::CString;

    let priority = match level {
        log::Level::Error => android_log_sys::LogPriority::ERROR,
        log::Level::Warn => android_log_sys::LogPriority::WARN,
        log::Level::Info => android_log_sys::LogPriority::INFO,
        log::Level::Debug => android_log_sys::LogPriority::DEBUG,
        log::Level::Trace => android_log_sys::LogPriority::VERBOSE,
    };
    let tag = b"pdf-signer\0";
    let c_msg = match CString::new(msg) {
        Ok(c) => c,
        Err(_) => return,
    };
    unsafe {
        android_log_sys::__android_log_print(
            priority as _,
            tag.as_ptr() as *const _,
            b"%s\0".as_ptr() as *const _,
            c_msg.as_ptr(),
        );
    }
}

#[cfg(not(target_os = "android"))]
fn write_line(level: log::Level, msg: &str) {
    eprintln!("{level:<5} {msg}");
}

/// Install the process logger once; later calls only adjust the level.
pub fn init(level: LevelFilter) {
    INSTALLED.get_or_init(|| log::set_logger(&LOGGER).is_ok());
    log::set_max_level(level);
}
