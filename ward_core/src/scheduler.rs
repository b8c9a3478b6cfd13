//! Admission and discharge scheduling.
//!
//! The scheduler is the single owner of all registry state:
//! - Emergency and normal waiting queues
//! - The arrival counter
//! - The ordered index and archive of discharged patients
//! - The undo/redo action history
//!
//! ## Dispatch rule
//!
//! Any waiting emergency patient is discharged before any normal patient,
//! regardless of arrival time or severity. Within a class, patients leave in
//! the order they arrived.

use crate::{
    config::TriageConfig, ActionHistory, ArchiveLog, Error, Inorder, Operation, OrderedIndex,
    PatientId, PatientIntake, PatientRecord, Priority, Result, Severity, SortKey,
};
use std::collections::VecDeque;
use std::ops::RangeInclusive;

/// Owned aggregate of the waiting queues, discharge index, archive and history
#[derive(Debug)]
pub struct AdmissionScheduler {
    /// Newest emergency arrival at the front, next to dispatch at the back
    emergency: VecDeque<PatientRecord>,
    /// Plain FIFO, next to dispatch at the front
    normal: VecDeque<PatientRecord>,
    time_counter: u64,
    index: OrderedIndex,
    archive: ArchiveLog,
    history: ActionHistory,
    expected_severity: RangeInclusive<Severity>,
}

impl Default for AdmissionScheduler {
    fn default() -> Self {
        Self::with_config(&TriageConfig::default())
    }
}

impl AdmissionScheduler {
    /// Empty registry with the default expected severity range
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &TriageConfig) -> Self {
        Self {
            emergency: VecDeque::new(),
            normal: VecDeque::new(),
            time_counter: 0,
            index: OrderedIndex::new(),
            archive: ArchiveLog::new(),
            history: ActionHistory::new(),
            expected_severity: config.severity_min..=config.severity_max,
        }
    }

    /// Admit a patient into the given class and record the admission
    ///
    /// Always succeeds. Severities outside the expected range and identifiers
    /// already seen are accepted as-is.
    pub fn admit(&mut self, intake: PatientIntake, priority: Priority) -> PatientRecord {
        if !self.expected_severity.contains(&intake.severity) {
            tracing::warn!(
                "Patient {} admitted with severity {} outside expected range {:?}",
                intake.id,
                intake.severity,
                self.expected_severity
            );
        }

        self.time_counter += 1;
        let record = PatientRecord::admitted(intake, self.time_counter, priority);

        match priority {
            Priority::Emergency => self.emergency.push_front(record.clone()),
            Priority::Normal => self.normal.push_back(record.clone()),
        }

        self.history.push(Operation::admit(record.clone()));

        tracing::info!(
            "Admitted {} patient {} ({}) at t={}",
            priority,
            record.id,
            record.name,
            record.arrival_time
        );
        record
    }

    /// Discharge the next patient under emergency-first priority
    ///
    /// The discharged record is indexed by identifier and prepended to the
    /// archive. Returns [`Error::EmptyRegistry`] without changing state when
    /// nobody is waiting.
    pub fn discharge(&mut self) -> Result<PatientRecord> {
        let record = self
            .emergency
            .pop_back()
            .or_else(|| self.normal.pop_front())
            .ok_or(Error::EmptyRegistry)?;

        self.index.insert(record.clone());
        self.archive.record(record.clone());

        tracing::info!(
            "Discharged {} patient {} ({}), {} still waiting",
            record.priority,
            record.id,
            record.name,
            self.waiting_len()
        );
        Ok(record)
    }

    /// Look up a discharged patient by identifier
    pub fn find_by_id(&self, id: PatientId) -> Result<&PatientRecord> {
        self.index.find_by_id(id).ok_or(Error::NotFound(id))
    }

    /// Move the latest recorded operation to the redo stack
    pub fn undo(&mut self) -> Result<&Operation> {
        self.history.undo()
    }

    /// Move the latest undone operation back to the undo stack
    pub fn redo(&mut self) -> Result<&Operation> {
        self.history.redo()
    }

    /// Discharged patients in identifier order
    pub fn discharged(&self) -> Inorder<'_> {
        self.index.inorder()
    }

    pub fn archive(&self) -> &ArchiveLog {
        &self.archive
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    /// Waiting patients in dispatch order: emergencies first, then normal
    pub fn waiting(&self) -> impl Iterator<Item = &PatientRecord> + '_ {
        self.emergency.iter().rev().chain(self.normal.iter())
    }

    pub fn waiting_len(&self) -> usize {
        self.emergency.len() + self.normal.len()
    }

    /// Arrival stamp given to the most recent admission
    pub fn time_counter(&self) -> u64 {
        self.time_counter
    }
}

/// Order a collection of records for reporting
///
/// Pure: the input is left untouched. Sorting is stable, so records with
/// equal keys keep their input order.
pub fn sorted_view<'a, I>(records: I, key: SortKey) -> Vec<&'a PatientRecord>
where
    I: IntoIterator<Item = &'a PatientRecord>,
{
    let mut view: Vec<_> = records.into_iter().collect();
    match key {
        SortKey::Severity => view.sort_by(|a, b| b.severity.cmp(&a.severity)),
        SortKey::ArrivalTime => view.sort_by_key(|r| r.arrival_time),
        SortKey::Department => view.sort_by(|a, b| a.department.cmp(&b.department)),
    }
    view
}
