//! Undo/redo history of admission operations.
//!
//! Two stacks hand operations back and forth. Undo and redo move the record of
//! an operation between the stacks; they do not touch the waiting queues.

use crate::{Error, HistoryStack, Operation, Result};

/// Undo and redo stacks of recorded operations
#[derive(Clone, Debug, Default)]
pub struct ActionHistory {
    undo: Vec<Operation>,
    redo: Vec<Operation>,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new operation. Any pending redo chain is discarded.
    pub fn push(&mut self, operation: Operation) {
        if !self.redo.is_empty() {
            tracing::debug!("Discarding {} redo entries", self.redo.len());
            self.redo.clear();
        }
        self.undo.push(operation);
    }

    /// Move the most recent operation onto the redo stack
    pub fn undo(&mut self) -> Result<&Operation> {
        Self::transfer(&mut self.undo, &mut self.redo, HistoryStack::Undo)
    }

    /// Move the most recently undone operation back onto the undo stack
    pub fn redo(&mut self) -> Result<&Operation> {
        Self::transfer(&mut self.redo, &mut self.undo, HistoryStack::Redo)
    }

    fn transfer<'a>(
        from: &mut Vec<Operation>,
        to: &'a mut Vec<Operation>,
        stack: HistoryStack,
    ) -> Result<&'a Operation> {
        let operation = from.pop().ok_or(Error::HistoryEmpty(stack))?;
        tracing::debug!(
            "{} {} for patient {}",
            stack,
            operation.kind,
            operation.patient.id
        );
        to.push(operation);
        Ok(&to[to.len() - 1])
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Undo stack, oldest first
    pub fn undo_entries(&self) -> &[Operation] {
        &self.undo
    }

    /// Redo stack, oldest first
    pub fn redo_entries(&self) -> &[Operation] {
        &self.redo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OperationKind, PatientIntake, PatientRecord, Priority};

    fn admit_op(id: i64) -> Operation {
        Operation::admit(PatientRecord::admitted(
            PatientIntake::new(id, "p", 4, "er"),
            id as u64,
            Priority::Normal,
        ))
    }

    fn ids(ops: &[Operation]) -> Vec<i64> {
        ops.iter().map(|op| op.patient.id).collect()
    }

    #[test]
    fn test_empty_history_reports_both_stacks() {
        let mut history = ActionHistory::new();
        assert!(matches!(
            history.undo(),
            Err(Error::HistoryEmpty(HistoryStack::Undo))
        ));
        assert!(matches!(
            history.redo(),
            Err(Error::HistoryEmpty(HistoryStack::Redo))
        ));
    }

    #[test]
    fn test_undo_then_redo_restores_stacks() {
        let mut history = ActionHistory::new();
        history.push(admit_op(1));
        history.push(admit_op(2));

        let undone = history.undo().unwrap();
        assert_eq!(undone.kind, OperationKind::Admit);
        assert_eq!(undone.patient.id, 2);
        assert_eq!(ids(history.undo_entries()), vec![1]);
        assert_eq!(ids(history.redo_entries()), vec![2]);

        let redone = history.redo().unwrap();
        assert_eq!(redone.patient.id, 2);
        assert_eq!(ids(history.undo_entries()), vec![1, 2]);
        assert_eq!(history.redo_depth(), 0);
    }

    #[test]
    fn test_redo_then_undo_restores_stacks() {
        let mut history = ActionHistory::new();
        history.push(admit_op(1));
        history.push(admit_op(2));
        history.undo().unwrap();
        history.undo().unwrap();

        history.redo().unwrap();
        history.undo().unwrap();
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(ids(history.redo_entries()), vec![2, 1]);
    }

    #[test]
    fn test_push_clears_redo() {
        let mut history = ActionHistory::new();
        history.push(admit_op(1));
        history.push(admit_op(2));
        history.undo().unwrap();
        history.undo().unwrap();
        assert_eq!(history.redo_depth(), 2);

        history.push(admit_op(3));
        assert_eq!(history.redo_depth(), 0);
        assert!(matches!(
            history.redo(),
            Err(Error::HistoryEmpty(HistoryStack::Redo))
        ));
        assert_eq!(ids(history.undo_entries()), vec![3]);
    }

    #[test]
    fn test_transfer_returns_moved_entry() {
        let mut history = ActionHistory::new();
        history.push(admit_op(7));

        let undone = history.undo().unwrap().clone();
        assert_eq!(history.redo_entries().last(), Some(&undone));

        let redone = history.redo().unwrap().clone();
        assert_eq!(redone, undone);
        assert_eq!(history.undo_entries().last(), Some(&redone));
        assert_eq!(history.redo_depth(), 0);
    }
}
