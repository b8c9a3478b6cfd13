//! Core domain types for the ward registry.
//!
//! This module defines the fundamental types used throughout the system:
//! - Patient intake fields and admitted records
//! - Priority classes
//! - Reversible operations recorded in the action history
//! - Sort keys for reporting views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Caller-assigned patient identifier. Uniqueness is not enforced.
pub type PatientId = i64;

/// Severity score, expected in 1..=10 but not enforced.
pub type Severity = i32;

// ============================================================================
// Patient Types
// ============================================================================

/// Admission class of a waiting patient
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Normal,
    Emergency,
}

impl Priority {
    pub fn is_emergency(self) -> bool {
        matches!(self, Priority::Emergency)
    }
}

impl From<bool> for Priority {
    fn from(emergency: bool) -> Self {
        if emergency {
            Priority::Emergency
        } else {
            Priority::Normal
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Normal => f.write_str("normal"),
            Priority::Emergency => f.write_str("emergency"),
        }
    }
}

/// Fields collected by the shell before admission
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientIntake {
    pub id: PatientId,
    pub name: String,
    pub severity: Severity,
    pub department: String,
}

impl PatientIntake {
    pub fn new(
        id: PatientId,
        name: impl Into<String>,
        severity: Severity,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            severity,
            department: department.into(),
        }
    }
}

/// An admitted patient. Only the scheduler creates these, since it owns
/// the arrival counter.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientRecord {
    pub id: PatientId,
    pub name: String,
    pub severity: Severity,
    pub department: String,
    pub arrival_time: u64,
    pub priority: Priority,
}

impl PatientRecord {
    pub(crate) fn admitted(intake: PatientIntake, arrival_time: u64, priority: Priority) -> Self {
        Self {
            id: intake.id,
            name: intake.name,
            severity: intake.severity,
            department: intake.department,
            arrival_time,
            priority,
        }
    }
}

// ============================================================================
// History Types
// ============================================================================

/// Kind of reversible operation. Admission is the only one produced today.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    Admit,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Admit => f.write_str("ADMIT"),
        }
    }
}

/// A recorded unit of work with a snapshot of the patient it touched
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    pub patient: PatientRecord,
    /// Wall-clock stamp, informational only
    pub recorded_at: DateTime<Utc>,
}

impl Operation {
    pub fn admit(patient: PatientRecord) -> Self {
        Self {
            kind: OperationKind::Admit,
            patient,
            recorded_at: Utc::now(),
        }
    }
}

/// Which history stack an operation was requested from
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HistoryStack {
    Undo,
    Redo,
}

impl fmt::Display for HistoryStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryStack::Undo => f.write_str("undo"),
            HistoryStack::Redo => f.write_str("redo"),
        }
    }
}

// ============================================================================
// Reporting Types
// ============================================================================

/// Ordering applied by [`crate::sorted_view`]
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most severe first
    Severity,
    /// Earliest arrival first
    ArrivalTime,
    /// Department name, ascending
    Department,
}

impl FromStr for SortKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "severity" => Ok(SortKey::Severity),
            "2" | "arrival" | "arrival_time" => Ok(SortKey::ArrivalTime),
            "3" | "department" => Ok(SortKey::Department),
            other => Err(crate::Error::Parse(format!("Unknown sort key: {}", other))),
        }
    }
}
