use std::{cmp::Ordering, marker::PhantomData};

///
/// BreakKeyStrategy
///
/// Decides whether two consecutively read records belong to the same group.
///
/// Implementations must be pure and consistent: over a run of records with
/// equal keys, `is_same_group` holds for every adjacent pair, so the strategy
/// partitions the input into maximal runs.
///

pub trait BreakKeyStrategy<T: ?Sized> {
    fn is_same_group(&self, prev: &T, curr: &T) -> bool;

    /// Natural key order of `(prev, curr)`, when the strategy knows one.
    ///
    /// Only used for out-of-order detection at group boundaries; strategies
    /// with no ordered key keep the default and are never order checked.
    fn key_order(&self, _prev: &T, _curr: &T) -> Option<Ordering> {
        None
    }
}

impl<T, B> BreakKeyStrategy<T> for &B
where
    T: ?Sized,
    B: BreakKeyStrategy<T> + ?Sized,
{
    fn is_same_group(&self, prev: &T, curr: &T) -> bool {
        (**self).is_same_group(prev, curr)
    }

    fn key_order(&self, prev: &T, curr: &T) -> Option<Ordering> {
        (**self).key_order(prev, curr)
    }
}

///
/// BreakFn
///
/// Strategy backed by a caller-supplied `(prev, curr) -> bool` predicate.
///

#[derive(Clone, Copy, Debug)]
pub struct BreakFn<F>(F);

impl<F> BreakFn<F> {
    pub const fn new(same_group: F) -> Self {
        Self(same_group)
    }
}

impl<T, F> BreakKeyStrategy<T> for BreakFn<F>
where
    F: Fn(&T, &T) -> bool,
{
    fn is_same_group(&self, prev: &T, curr: &T) -> bool {
        (self.0)(prev, curr)
    }
}

///
/// KeyBreak
///
/// Strategy backed by a key extractor: records share a group iff their
/// extracted keys are equal. Only equality is required, so boundaries are
/// never order checked; use `OrderedKeyBreak` for that.
///
/// Extractors return owned keys (`Copy` ids, cloned strings); a key borrowed
/// from the record cannot outlive the call.
///

pub struct KeyBreak<F, K> {
    key: F,
    _key: PhantomData<fn() -> K>,
}

impl<F, K> KeyBreak<F, K> {
    pub const fn new(key: F) -> Self {
        Self {
            key,
            _key: PhantomData,
        }
    }
}

impl<T, K, F> BreakKeyStrategy<T> for KeyBreak<F, K>
where
    F: Fn(&T) -> K,
    K: PartialEq,
{
    fn is_same_group(&self, prev: &T, curr: &T) -> bool {
        (self.key)(prev) == (self.key)(curr)
    }
}

///
/// OrderedKeyBreak
///
/// `KeyBreak` over a totally ordered key. The key order also feeds the
/// boundary order check, so a key decrease fails the reader.
///

pub struct OrderedKeyBreak<F, K> {
    key: F,
    _key: PhantomData<fn() -> K>,
}

impl<F, K> OrderedKeyBreak<F, K> {
    pub const fn new(key: F) -> Self {
        Self {
            key,
            _key: PhantomData,
        }
    }
}

impl<T, K, F> BreakKeyStrategy<T> for OrderedKeyBreak<F, K>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    fn is_same_group(&self, prev: &T, curr: &T) -> bool {
        (self.key)(prev) == (self.key)(curr)
    }

    fn key_order(&self, prev: &T, curr: &T) -> Option<Ordering> {
        Some((self.key)(prev).cmp(&(self.key)(curr)))
    }
}
