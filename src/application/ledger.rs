//! In-memory ledger of submitted form records.

use crate::domain::{DomainError, DomainResult, FormValues};

/// One submitted record.
///
/// `id` is assigned by the ledger and never reused, so a record that is
/// checked out for editing and submitted again comes back as a new entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub id: u64,
    pub form_type: String,
    pub values: FormValues,
}

/// Ordered list of submitted records, oldest first.
#[derive(Debug, Default)]
pub struct SubmissionLedger {
    entries: Vec<LedgerEntry>,
    next_id: u64,
}

impl SubmissionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot of `values` and returns the new entry's id.
    pub fn append(&mut self, form_type: &str, values: FormValues) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(LedgerEntry {
            id,
            form_type: form_type.to_string(),
            values,
        });
        id
    }

    /// Removes and returns the entry at `index`, shifting later entries down.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::LedgerIndexOutOfRange`] and leaves the ledger
    /// untouched when `index` is past the end.
    pub fn remove(&mut self, index: usize) -> DomainResult<LedgerEntry> {
        self.check_index(index)?;
        Ok(self.entries.remove(index))
    }

    fn check_index(&self, index: usize) -> DomainResult<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(DomainError::LedgerIndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }

    pub fn get(&self, index: usize) -> Option<&LedgerEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn entries_for<'a>(&'a self, form_type: &'a str) -> impl Iterator<Item = &'a LedgerEntry> {
        self.entries.iter().filter(move |entry| entry.form_type == form_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldValue;

    fn record(name: &str) -> FormValues {
        let mut values = FormValues::new();
        values.insert("firstName".to_string(), FieldValue::from(name));
        values
    }

    #[test]
    fn test_append_keeps_submission_order() {
        let mut ledger = SubmissionLedger::new();
        ledger.append("userInfo", record("A"));
        ledger.append("userInfo", record("B"));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[0].values, record("A"));
        assert_eq!(ledger.entries()[1].values, record("B"));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut ledger = SubmissionLedger::new();
        let first = ledger.append("userInfo", record("A"));
        let removed = ledger.remove(0).unwrap();
        let second = ledger.append("userInfo", removed.values.clone());

        assert_eq!(removed.id, first);
        assert_ne!(first, second);
        assert_eq!(ledger.entries()[0].values, removed.values);
    }

    #[test]
    fn test_remove_shifts_later_entries() {
        let mut ledger = SubmissionLedger::new();
        ledger.append("userInfo", record("A"));
        ledger.append("userInfo", record("B"));
        ledger.append("userInfo", record("C"));

        let removed = ledger.remove(1).unwrap();
        assert_eq!(removed.values, record("B"));
        assert_eq!(ledger.get(1).map(|entry| &entry.values), Some(&record("C")));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut ledger = SubmissionLedger::new();
        ledger.append("userInfo", record("A"));

        assert_eq!(
            ledger.remove(1),
            Err(DomainError::LedgerIndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_entries_for_form_type() {
        let mut ledger = SubmissionLedger::new();
        ledger.append("userInfo", record("A"));
        ledger.append("addressInfo", FormValues::new());
        ledger.append("userInfo", record("B"));

        assert_eq!(ledger.entries_for("userInfo").count(), 2);
        assert_eq!(ledger.entries_for("addressInfo").count(), 1);
        assert_eq!(ledger.entries_for("paymentInfo").count(), 0);
    }
}
