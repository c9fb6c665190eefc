use crate::{
    error::SourceError,
    obs::{TraceEvent, TraceSink},
    stream::OrderedSource,
};
use std::sync::Mutex;

///
/// StaticSource
///
/// Vector-backed source that can be told to fail when asked for the record
/// at a given index.
///

pub(crate) struct StaticSource<T> {
    records: Vec<T>,
    index: usize,
    fail_at: Option<usize>,
    polls: usize,
}

impl<T: Clone> StaticSource<T> {
    pub(crate) const fn new(records: Vec<T>) -> Self {
        Self {
            records,
            index: 0,
            fail_at: None,
            polls: 0,
        }
    }

    pub(crate) const fn with_fail_at(records: Vec<T>, fail_at: usize) -> Self {
        Self {
            records,
            index: 0,
            fail_at: Some(fail_at),
            polls: 0,
        }
    }

    pub(crate) const fn polls(&self) -> usize {
        self.polls
    }
}

impl<T: Clone> OrderedSource for StaticSource<T> {
    type Item = T;

    fn next_record(&mut self) -> Result<Option<T>, SourceError> {
        self.polls = self.polls.saturating_add(1);
        if self.fail_at.is_some_and(|idx| self.index == idx) {
            return Err(SourceError::new("forced source failure"));
        }
        if self.index >= self.records.len() {
            return Ok(None);
        }

        let record = self.records[self.index].clone();
        self.index = self.index.saturating_add(1);

        Ok(Some(record))
    }
}

///
/// RecordingSink
///

#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<TraceEvent>>,
}

impl RecordingSink {
    pub(crate) fn leaked() -> &'static Self {
        Box::leak(Box::default())
    }

    pub(crate) fn events(&self) -> Vec<TraceEvent> {
        self.events
            .lock()
            .expect("recording sink lock should not be poisoned")
            .clone()
    }
}

impl TraceSink for RecordingSink {
    fn on_event(&self, event: TraceEvent) {
        self.events
            .lock()
            .expect("recording sink lock should not be poisoned")
            .push(event);
    }
}
