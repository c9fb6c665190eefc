use crate::{
    config::Direction,
    error::{ErrorClass, SourceError, StreamError, StreamSide},
    stream::{IterSource, KeyOrderComparator, OrderedSource, PeekableSource, VecSource},
    test_support::StaticSource,
};
use proptest::prelude::*;
use std::{cmp::Ordering, io};

fn drain<S: OrderedSource>(source: &mut PeekableSource<S>) -> Result<Vec<S::Item>, StreamError> {
    let mut out = Vec::new();
    while let Some(record) = source.next_record()? {
        out.push(record);
    }

    Ok(out)
}

#[test]
fn vec_source_yields_records_in_input_order() {
    let mut source = VecSource::new(vec![3, 1, 2, 1]);
    let mut out = Vec::new();

    while let Some(record) = source.next_record().expect("vec source never fails") {
        out.push(record);
    }

    assert_eq!(out, vec![3, 1, 2, 1]);
}

#[test]
fn vec_source_reports_stable_exact_len_hint() {
    let mut source = VecSource::from(vec!['a', 'b']);
    assert_eq!(source.exact_len_hint(), Some(2));

    let _ = source.next_record().expect("first read must succeed");
    assert_eq!(
        source.exact_len_hint(),
        Some(2),
        "exact hint must stay stable after consumption"
    );
}

#[test]
fn iter_source_stamps_failure_offset_when_missing() {
    let rows: Vec<Result<u32, io::Error>> = vec![
        Ok(1),
        Ok(2),
        Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated row")),
    ];
    let mut source = IterSource::new(rows.into_iter());

    assert_eq!(source.next_record().expect("row 0"), Some(1));
    assert_eq!(source.next_record().expect("row 1"), Some(2));

    let err = source.next_record().expect_err("row 2 must fail");
    assert_eq!(err.offset(), Some(2));
    assert_eq!(err.message(), "truncated row");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn iter_source_keeps_offset_reported_by_the_collaborator() {
    let rows: Vec<Result<u32, SourceError>> =
        vec![Err(SourceError::new("bad checksum").at_offset(41))];
    let mut source = IterSource::new(rows.into_iter());

    let err = source.next_record().expect_err("row must fail");
    assert_eq!(err.offset(), Some(41));
}

#[test]
fn peek_is_stable_and_does_not_advance() {
    let inner = StaticSource::new(vec![10, 20]);
    let mut source = PeekableSource::new(inner);

    for _ in 0..5 {
        assert_eq!(source.peek().expect("peek must succeed"), Some(&10));
    }
    assert_eq!(source.records_read(), 1, "peek must buffer exactly one record");
    assert_eq!(source.lookahead_offset(), Some(0));

    assert_eq!(source.next_record().expect("next must succeed"), Some(10));
    assert_eq!(source.peek().expect("peek must succeed"), Some(&20));
    assert_eq!(source.lookahead_offset(), Some(1));
}

#[test]
fn next_without_peek_reads_fresh_records() {
    let mut source = PeekableSource::new(VecSource::new(vec!["a", "b"]));

    assert_eq!(drain(&mut source).expect("drain must succeed"), vec!["a", "b"]);
    assert!(source.is_exhausted());
}

#[test]
fn exhausted_source_is_never_polled_again() {
    let mut source = PeekableSource::new(StaticSource::new(vec![1]));

    assert_eq!(source.next_record().expect("first"), Some(1));
    assert_eq!(source.next_record().expect("second"), None);
    assert_eq!(source.peek().expect("third"), None);
    assert_eq!(source.next_record().expect("fourth"), None);

    assert_eq!(source.records_read(), 1);
    assert!(source.is_exhausted());
}

#[test]
fn exhausted_source_polls_underlying_stream_once_for_end_of_stream() {
    let mut inner = StaticSource::new(vec![1, 2]);
    {
        let mut source = PeekableSource::new(&mut inner);
        let _ = drain(&mut source).expect("drain must succeed");
        let _ = source.peek().expect("peek after end must succeed");
        let _ = source.next_record().expect("next after end must succeed");
    }

    assert_eq!(inner.polls(), 3, "two records plus one end-of-stream poll");
}

#[test]
fn next_if_only_consumes_accepted_records() {
    let mut source = PeekableSource::new(VecSource::new(vec![2, 4, 5, 6]));
    let mut evens = Vec::new();

    while let Some(record) = source.next_if(|n| n % 2 == 0).expect("next_if must succeed") {
        evens.push(record);
    }

    assert_eq!(evens, vec![2, 4]);
    assert_eq!(source.peek().expect("peek must succeed"), Some(&5));
}

#[test]
fn read_failure_reports_offset_and_poisons_the_source() {
    let mut source =
        PeekableSource::for_side(StaticSource::with_fail_at(vec![1, 2, 3], 2), StreamSide::Left);

    assert_eq!(source.next_record().expect("record 0"), Some(1));
    assert_eq!(source.next_record().expect("record 1"), Some(2));

    let err = source.peek().expect_err("record 2 must fail");
    assert!(matches!(
        err,
        StreamError::SourceRead {
            side: StreamSide::Left,
            offset: 2,
            ..
        }
    ));
    assert_eq!(err.class(), ErrorClass::Source);
    assert!(source.is_poisoned());

    let again = source.next_record().expect_err("poisoned source must re-raise");
    assert!(matches!(
        again,
        StreamError::SourceInvalidated {
            side: StreamSide::Left
        }
    ));
    assert_eq!(again.class(), ErrorClass::Misuse);
}

#[test]
fn boxed_sources_forward_reads_and_hints() {
    let boxed: crate::stream::OrderedSourceBox<u8> = Box::new(VecSource::new(vec![7, 8]));
    let mut source = PeekableSource::new(boxed);

    assert_eq!(source.exact_len_hint(), Some(2));
    assert_eq!(drain(&mut source).expect("drain must succeed"), vec![7, 8]);
}

#[test]
fn comparator_orients_comparisons_by_direction() {
    let asc = KeyOrderComparator::from_direction(Direction::Asc);
    let desc = KeyOrderComparator::from_direction(Direction::Desc);

    assert_eq!(asc.compare(&1, &2), Ordering::Less);
    assert_eq!(desc.compare(&1, &2), Ordering::Greater);
    assert!(asc.violates_monotonicity(Ordering::Greater));
    assert!(!asc.violates_monotonicity(Ordering::Equal));
    assert!(desc.violates_monotonicity(Ordering::Less));
    assert!(!desc.violates_monotonicity(Ordering::Greater));
}

proptest! {
    #[test]
    fn peekable_source_replays_any_input_exactly(
        records in prop::collection::vec(any::<i32>(), 0..64),
        peeks in prop::collection::vec(0usize..3, 0..64),
    ) {
        let mut source = PeekableSource::new(VecSource::new(records.clone()));
        let mut out = Vec::new();

        for (step, _) in records.iter().enumerate() {
            let repeat = peeks.get(step).copied().unwrap_or(0);
            let mut seen = None;
            for _ in 0..repeat {
                let peeked = source.peek().expect("peek must succeed").copied();
                if let Some(previous) = seen {
                    prop_assert_eq!(Some(previous), peeked);
                }
                seen = peeked;
            }
            let record = source.next_record().expect("next must succeed");
            prop_assert!(record.is_some());
            out.extend(record);
        }

        prop_assert_eq!(source.next_record().expect("end must succeed"), None);
        prop_assert_eq!(out, records);
    }
}
