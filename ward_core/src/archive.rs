//! Archive of discharged patients.
//!
//! A prepend-only singly linked list: the head is always the most recent
//! discharge, so traversal runs in reverse discharge order.

use crate::PatientRecord;

#[derive(Debug)]
struct ArchiveNode {
    record: PatientRecord,
    next: Option<Box<ArchiveNode>>,
}

/// Newest-first log of discharged patients
#[derive(Debug, Default)]
pub struct ArchiveLog {
    head: Option<Box<ArchiveNode>>,
    len: usize,
}

impl ArchiveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Prepend a discharged patient
    pub fn record(&mut self, record: PatientRecord) {
        tracing::debug!("Archived patient {}", record.id);
        let next = self.head.take();
        self.head = Some(Box::new(ArchiveNode { record, next }));
        self.len += 1;
    }

    /// Most recently archived patient
    pub fn latest(&self) -> Option<&PatientRecord> {
        self.head.as_deref().map(|node| &node.record)
    }

    /// All archived patients, newest first
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl Drop for ArchiveLog {
    // Unlink node by node so a long archive can't blow the stack.
    fn drop(&mut self) {
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

/// Newest-first iterator over an [`ArchiveLog`]
pub struct Iter<'a> {
    next: Option<&'a ArchiveNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a PatientRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.record
        })
    }
}

impl<'a> IntoIterator for &'a ArchiveLog {
    type Item = &'a PatientRecord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
