use crate::error::SourceError;

///
/// OrderedSource
///
/// Pull-based contract for a forward-only, single-consumption record
/// provider that is already sorted by the key relevant to the current use.
///

pub trait OrderedSource {
    type Item;

    /// Produce the next record, `Ok(None)` at end of stream.
    fn next_record(&mut self) -> Result<Option<Self::Item>, SourceError>;

    // Return the exact total number of records this source can emit.
    // Implementations should keep this stable across consumption.
    fn exact_len_hint(&self) -> Option<usize> {
        None
    }
}

pub type OrderedSourceBox<T> = Box<dyn OrderedSource<Item = T>>;

impl<S> OrderedSource for Box<S>
where
    S: OrderedSource + ?Sized,
{
    type Item = S::Item;

    fn next_record(&mut self) -> Result<Option<Self::Item>, SourceError> {
        self.as_mut().next_record()
    }

    fn exact_len_hint(&self) -> Option<usize> {
        self.as_ref().exact_len_hint()
    }
}

impl<S> OrderedSource for &mut S
where
    S: OrderedSource + ?Sized,
{
    type Item = S::Item;

    fn next_record(&mut self) -> Result<Option<Self::Item>, SourceError> {
        (**self).next_record()
    }

    fn exact_len_hint(&self) -> Option<usize> {
        (**self).exact_len_hint()
    }
}

///
/// VecSource
///
/// Adapter that exposes one materialized record vector through the
/// `OrderedSource` interface.
///

#[derive(Debug)]
pub struct VecSource<T> {
    records: std::vec::IntoIter<T>,
    total_len: usize,
}

impl<T> VecSource<T> {
    #[must_use]
    pub fn new(records: Vec<T>) -> Self {
        let total_len = records.len();

        Self {
            records: records.into_iter(),
            total_len,
        }
    }
}

impl<T> From<Vec<T>> for VecSource<T> {
    fn from(records: Vec<T>) -> Self {
        Self::new(records)
    }
}

impl<T> OrderedSource for VecSource<T> {
    type Item = T;

    fn next_record(&mut self) -> Result<Option<T>, SourceError> {
        Ok(self.records.next())
    }

    fn exact_len_hint(&self) -> Option<usize> {
        Some(self.total_len)
    }
}

///
/// IterSource
///
/// Adapter over any fallible record iterator (a file reader, a cursor over
/// a table extract). Failures without their own offset are stamped with the
/// index of the record that could not be produced.
///

#[derive(Debug)]
pub struct IterSource<I> {
    inner: I,
    offset: u64,
}

impl<I> IterSource<I> {
    #[must_use]
    pub const fn new(inner: I) -> Self {
        Self { inner, offset: 0 }
    }

    #[must_use]
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I, T, E> OrderedSource for IterSource<I>
where
    I: Iterator<Item = Result<T, E>>,
    E: Into<SourceError>,
{
    type Item = T;

    fn next_record(&mut self) -> Result<Option<T>, SourceError> {
        match self.inner.next() {
            None => Ok(None),
            Some(Ok(record)) => {
                self.offset = self.offset.saturating_add(1);
                Ok(Some(record))
            }
            Some(Err(err)) => {
                let err: SourceError = err.into();
                if err.offset().is_some() {
                    Err(err)
                } else {
                    Err(err.at_offset(self.offset))
                }
            }
        }
    }
}
