//! # Position Log
//!
//! Append-only record of every pose the renderer drew. One line per change:
//!
//! ```text
//! 14:02:11 - Position: P: 10 Y: -5 R: 0
//! ```

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use arm_if::eqpt::Pose;
use util::time;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Writer for position log records.
#[derive(Debug)]
pub struct PositionLog<W: Write> {
    writer: W,

    num_records: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PositionLog<File> {
    /// Open the log file at the given path, creating it if needed and appending otherwise.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).create(true).open(path)?;

        Ok(Self::new(file))
    }
}

impl<W: Write> PositionLog<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            num_records: 0,
        }
    }

    /// Append a record stamped with the current local time.
    pub fn record(&mut self, pose: &Pose) -> io::Result<()> {
        self.record_at(&time::now_clock_timestamp(), pose)
    }

    /// Append a record with an explicit timestamp string.
    pub fn record_at(&mut self, timestamp: &str, pose: &Pose) -> io::Result<()> {
        writeln!(self.writer, "{} - Position: {}", timestamp, pose)?;

        // Each record must be on disk before the next redraw
        self.writer.flush()?;

        self.num_records += 1;
        Ok(())
    }

    /// Number of records written through this writer.
    pub fn num_records(&self) -> u64 {
        self.num_records
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_record_format() {
        let mut log = PositionLog::new(Vec::new());

        log.record_at("14:02:11", &Pose::new(10, -5, 0)).unwrap();
        log.record_at("14:02:12", &Pose::new(12, -5, 0)).unwrap();

        assert_eq!(
            String::from_utf8(log.get_ref().clone()).unwrap(),
            "14:02:11 - Position: P: 10 Y: -5 R: 0\n14:02:12 - Position: P: 12 Y: -5 R: 0\n"
        );
        assert_eq!(log.num_records(), 2);
    }

    #[test]
    fn test_record_uses_clock_timestamp() {
        let mut log = PositionLog::new(Vec::new());

        log.record(&Pose::new(1, 2, 3)).unwrap();

        let line = String::from_utf8(log.get_ref().clone()).unwrap();

        // "HH:MM:SS" prefix
        let (stamp, rest) = line.split_at(8);
        assert_eq!(stamp.len(), 8);
        assert_eq!(stamp.matches(':').count(), 2);
        assert_eq!(rest, " - Position: P: 1 Y: 2 R: 3\n");
    }

    #[test]
    fn test_open_appends() {
        let path = std::env::temp_dir().join(format!(
            "position_log_test_{}.txt",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let mut log = PositionLog::open(&path).unwrap();
            log.record_at("00:00:01", &Pose::new(0, 0, 0)).unwrap();
        }
        {
            let mut log = PositionLog::open(&path).unwrap();
            log.record_at("00:00:02", &Pose::new(5, 0, 0)).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);

        std::fs::remove_file(&path).unwrap();
    }
}
