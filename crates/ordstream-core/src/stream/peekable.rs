use crate::{
    error::{StreamError, StreamSide},
    stream::OrderedSource,
};

///
/// Lookahead
///
/// Single read-ahead slot. `Poisoned` is terminal: the underlying source
/// failed and is never polled again.
///

enum Lookahead<T> {
    Empty,
    Ready(T),
    Exhausted,
    Poisoned,
}

///
/// PeekableSource
///
/// One-record lookahead over an `OrderedSource`.
///
/// At most one record is buffered at any time. Once the source reports end of
/// stream it is not polled again; once it fails, every later call returns
/// `SourceInvalidated`. Driven by exactly one consumer through `&mut self`.
///

pub struct PeekableSource<S>
where
    S: OrderedSource,
{
    inner: S,
    lookahead: Lookahead<S::Item>,
    side: StreamSide,
    read: u64,
}

impl<S> PeekableSource<S>
where
    S: OrderedSource,
{
    #[must_use]
    pub const fn new(inner: S) -> Self {
        Self::for_side(inner, StreamSide::Single)
    }

    /// Wrap a source that feeds one side of a two-input engine.
    #[must_use]
    pub const fn for_side(inner: S, side: StreamSide) -> Self {
        Self {
            inner,
            lookahead: Lookahead::Empty,
            side,
            read: 0,
        }
    }

    /// Return the next record without consuming it.
    pub fn peek(&mut self) -> Result<Option<&S::Item>, StreamError> {
        self.fill()?;

        match &self.lookahead {
            Lookahead::Ready(record) => Ok(Some(record)),
            _ => Ok(None),
        }
    }

    /// Consume the buffered record, or read a fresh one.
    pub fn next_record(&mut self) -> Result<Option<S::Item>, StreamError> {
        self.fill()?;

        match std::mem::replace(&mut self.lookahead, Lookahead::Empty) {
            Lookahead::Ready(record) => Ok(Some(record)),
            other => {
                self.lookahead = other;
                Ok(None)
            }
        }
    }

    /// Consume the next record only when it satisfies `accept`.
    pub fn next_if(
        &mut self,
        accept: impl FnOnce(&S::Item) -> bool,
    ) -> Result<Option<S::Item>, StreamError> {
        let take = match self.peek()? {
            Some(record) => accept(record),
            None => false,
        };
        if take {
            self.next_record()
        } else {
            Ok(None)
        }
    }

    /// Number of records successfully read from the underlying source,
    /// including a buffered lookahead record.
    #[must_use]
    pub const fn records_read(&self) -> u64 {
        self.read
    }

    /// Source index of the buffered lookahead record, if one is buffered.
    #[must_use]
    pub const fn lookahead_offset(&self) -> Option<u64> {
        match self.lookahead {
            Lookahead::Ready(_) => Some(self.read.saturating_sub(1)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.lookahead, Lookahead::Exhausted)
    }

    #[must_use]
    pub const fn is_poisoned(&self) -> bool {
        matches!(self.lookahead, Lookahead::Poisoned)
    }

    #[must_use]
    pub const fn side(&self) -> StreamSide {
        self.side
    }

    #[must_use]
    pub fn exact_len_hint(&self) -> Option<usize> {
        self.inner.exact_len_hint()
    }

    // Ensure the lookahead slot is resolved: a record, exhaustion, or failure.
    fn fill(&mut self) -> Result<(), StreamError> {
        match self.lookahead {
            Lookahead::Empty => {}
            Lookahead::Ready(_) | Lookahead::Exhausted => return Ok(()),
            Lookahead::Poisoned => {
                return Err(StreamError::SourceInvalidated { side: self.side });
            }
        }

        match self.inner.next_record() {
            Ok(Some(record)) => {
                self.read = self.read.saturating_add(1);
                self.lookahead = Lookahead::Ready(record);
            }
            Ok(None) => self.lookahead = Lookahead::Exhausted,
            Err(source) => {
                self.lookahead = Lookahead::Poisoned;
                let offset = source.offset().unwrap_or(self.read);

                return Err(StreamError::SourceRead {
                    side: self.side,
                    offset,
                    source,
                });
            }
        }

        Ok(())
    }
}
