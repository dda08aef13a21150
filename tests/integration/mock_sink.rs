//! Recording violation sink shared by the integration tests.

use std::sync::Mutex;

use chordguard::ports::ViolationSink;
use chordguard::violations::ViolationRecord;

/// Keeps every accepted record; refuses once `capacity` is reached.
pub struct RecordingSink {
    records: Mutex<Vec<ViolationRecord>>,
    refused: Mutex<u32>,
    capacity: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::with_capacity(usize::MAX)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            refused: Mutex::new(0),
            capacity,
        }
    }

    pub fn records(&self) -> Vec<ViolationRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn refused(&self) -> u32 {
        *self.refused.lock().unwrap()
    }
}

impl ViolationSink for RecordingSink {
    fn offer(&self, record: ViolationRecord) -> bool {
        let mut records = self.records.lock().unwrap();
        if records.len() >= self.capacity {
            *self.refused.lock().unwrap() += 1;
            return false;
        }
        records.push(record);
        true
    }
}
