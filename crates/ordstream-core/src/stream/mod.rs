//! Module: stream
//! Responsibility: ordered source contract, source adapters, key-order
//! comparator, and the one-record lookahead wrapper.
//! Does not own: grouping or join policy.
//! Boundary: every engine pulls records exclusively through `PeekableSource`.

mod order;
mod peekable;
mod source;

#[cfg(test)]
mod tests;

pub use order::KeyOrderComparator;
pub use peekable::PeekableSource;
pub use source::{IterSource, OrderedSource, OrderedSourceBox, VecSource};
