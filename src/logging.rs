use crate::error::{Error, Result};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

/// Appends records to a file. The terminal belongs to the animation, so
/// nothing goes to stdout or stderr.
pub struct FileLogger {
    file: Mutex<File>,
    started: Instant,
    level: LevelFilter,
}

impl FileLogger {
    pub fn open(path: &Path, level: LevelFilter) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| Error::LogFile {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            file: Mutex::new(file),
            started: Instant::now(),
            level,
        })
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed().as_secs_f32();
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "[{:>9.3}s {:<5} {}] {}",
                elapsed,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Installs the file logger when `path` is given; otherwise logging stays off.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let logger = FileLogger::open(path, LevelFilter::Debug)?;
    // A second install is ignored; the first logger keeps running.
    if log::set_logger(Box::leak(Box::new(logger))).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_file_logger_appends_enabled_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let logger = FileLogger::open(&path, LevelFilter::Info).unwrap();

        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("termfireworks")
                .args(format_args!("viewport 24x80"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("termfireworks")
                .args(format_args!("filtered out"))
                .build(),
        );
        logger.flush();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("INFO"));
        assert!(contents.contains("viewport 24x80"));
        assert!(!contents.contains("filtered out"));
    }

    #[test]
    fn test_open_reports_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/run.log");
        let err = FileLogger::open(&path, LevelFilter::Debug).err().unwrap();
        assert!(matches!(err, Error::LogFile { .. }));
        assert!(err.to_string().contains("run.log"));
    }

    #[test]
    fn test_init_without_path_is_noop() {
        assert!(init(None).is_ok());
    }
}
