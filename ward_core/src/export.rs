//! Export of registry contents for reporting.
//!
//! The registry itself is volatile; these files are written for people and
//! other tools and are never read back. Every export is written to a temp
//! file in the target directory, fsynced, then renamed into place.

use crate::{AdmissionScheduler, ArchiveLog, Error, PatientRecord, Priority, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// A row in the archive CSV
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: i64,
    name: &'a str,
    severity: i32,
    department: &'a str,
    arrival_time: u64,
    priority: Priority,
}

impl<'a> From<&'a PatientRecord> for CsvRow<'a> {
    fn from(record: &'a PatientRecord) -> Self {
        CsvRow {
            id: record.id,
            name: &record.name,
            severity: record.severity,
            department: &record.department,
            arrival_time: record.arrival_time,
            priority: record.priority,
        }
    }
}

/// Point-in-time view of the whole registry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// Waiting patients in dispatch order
    pub waiting: Vec<PatientRecord>,
    /// Discharged patients in identifier order
    pub discharged: Vec<PatientRecord>,
    /// Discharged patients, newest first
    pub archive: Vec<PatientRecord>,
    pub undo_depth: usize,
    pub redo_depth: usize,
}

impl RegistrySnapshot {
    pub fn capture(scheduler: &AdmissionScheduler) -> Self {
        Self {
            waiting: scheduler.waiting().cloned().collect(),
            discharged: scheduler.discharged().cloned().collect(),
            archive: scheduler.archive().iter().cloned().collect(),
            undo_depth: scheduler.history().undo_depth(),
            redo_depth: scheduler.history().redo_depth(),
        }
    }
}

/// Write the archive as CSV, newest discharge first
///
/// Returns the number of rows written.
pub fn write_archive_csv(path: &Path, archive: &ArchiveLog) -> Result<usize> {
    let mut count = 0;
    write_atomically(path, |file| {
        let mut writer = csv::Writer::from_writer(file);
        for record in archive {
            writer.serialize(CsvRow::from(record))?;
            count += 1;
        }
        writer.flush()?;
        Ok(())
    })?;

    tracing::info!("Exported {} archived patients to {:?}", count, path);
    Ok(count)
}

/// Write a JSON snapshot of the registry
pub fn write_snapshot_json(path: &Path, scheduler: &AdmissionScheduler) -> Result<()> {
    let snapshot = RegistrySnapshot::capture(scheduler);
    write_atomically(path, |file| {
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    })?;

    tracing::info!(
        "Exported snapshot ({} waiting, {} discharged) to {:?}",
        snapshot.waiting.len(),
        snapshot.discharged.len(),
        path
    );
    Ok(())
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&File) -> Result<()>,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    // Temp file in the same directory so the rename stays on one filesystem
    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    write(temp.as_file())?;

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}
