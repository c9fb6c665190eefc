use crate::{
    Error, ErrorKind, ErrorOrigin, collect_groups, collect_outcomes,
    core::{
        config::Direction,
        error::{SourceError, StreamError, StreamSide},
        group::GroupingReader,
        join::{JoinOutcome, SortMergeJoin},
        obs::EngineKind,
        stream::{IterSource, VecSource},
    },
};

#[test]
fn source_read_maps_to_source_kind_and_side_origin() {
    let err: Error = StreamError::SourceRead {
        side: StreamSide::Right,
        offset: 7,
        source: SourceError::new("connection reset"),
    }
    .into();

    assert_eq!(err.kind, ErrorKind::Source);
    assert_eq!(err.origin, ErrorOrigin::Right);
    assert!(err.message.contains("record 7"));
    assert!(err.message.contains("connection reset"));
    assert!(err.is_data_error());
}

#[test]
fn ordering_and_conflict_keep_their_input_side() {
    let ordering: Error = StreamError::OutOfOrderInput {
        side: StreamSide::Single,
        offset: 3,
        direction: Direction::Desc,
    }
    .into();
    assert_eq!(ordering.kind, ErrorKind::Ordering);
    assert_eq!(ordering.origin, ErrorOrigin::Source);
    assert!(ordering.message.contains("DESC"));

    let conflict: Error = StreamError::DuplicateAnchorKey { offset: 1 }.into();
    assert_eq!(conflict.kind, ErrorKind::Conflict);
    assert_eq!(conflict.origin, ErrorOrigin::Left);
}

#[test]
fn engine_failures_have_engine_origin() {
    let err: Error = StreamError::EngineFailed {
        engine: EngineKind::MergeJoin,
    }
    .into();

    assert_eq!(err.kind, ErrorKind::Misuse);
    assert_eq!(err.origin, ErrorOrigin::Engine);
    assert!(!err.is_data_error());
    assert_eq!(err.to_string(), "merge join engine was driven again after failing");
}

#[test]
fn error_round_trips_through_json() {
    let err = Error::new(ErrorKind::Limit, ErrorOrigin::Right, "right run records limit exceeded");

    let json = serde_json::to_string(&err).expect("error should serialize");
    let back: Error = serde_json::from_str(&json).expect("error should deserialize");

    assert_eq!(back, err);
    assert!(json.contains("\"Limit\""));
}

#[test]
fn kind_and_origin_display_as_variant_names() {
    assert_eq!(ErrorKind::Ordering.to_string(), "Ordering");
    assert_eq!(ErrorOrigin::Left.to_string(), "Left");
}

#[test]
fn collect_groups_drains_a_reader() {
    let reader = GroupingReader::by_key(VecSource::new(vec![1u8, 1, 2]), |n: &u8| *n);
    let groups = collect_groups(reader).expect("sorted input should group");

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].as_slice(), &[1, 1]);
}

#[test]
fn collect_groups_maps_source_failures() {
    let rows: Vec<Result<u8, SourceError>> = vec![Ok(1), Err(SourceError::new("bad row"))];
    let reader = GroupingReader::by_key(IterSource::new(rows.into_iter()), |n: &u8| *n);

    let err = collect_groups(reader).expect_err("second row should fail");
    assert_eq!(err.kind, ErrorKind::Source);
    assert_eq!(err.origin, ErrorOrigin::Source);
}

#[test]
fn collect_outcomes_drains_a_join() {
    let join = SortMergeJoin::new(
        VecSource::new(vec!["a", "b"]),
        VecSource::new(vec!["b", "c"]),
        |s: &&str| *s,
        |s: &&str| *s,
    );
    let outcomes = collect_outcomes(join).expect("sorted inputs should join");

    assert_eq!(
        outcomes,
        vec![
            JoinOutcome::LeftOnly("a"),
            JoinOutcome::Matched {
                left: "b",
                right: vec!["b"],
            },
            JoinOutcome::RightOnly("c"),
        ]
    );
}

#[test]
fn data_errors_are_distinguished_from_misuse_and_internal() {
    let cases = [
        (ErrorKind::Source, true),
        (ErrorKind::Ordering, true),
        (ErrorKind::Limit, true),
        (ErrorKind::Conflict, true),
        (ErrorKind::Misuse, false),
        (ErrorKind::Internal, false),
    ];

    for (kind, expected) in cases {
        let err = Error::new(kind, ErrorOrigin::Engine, "classified");
        assert_eq!(err.is_data_error(), expected, "kind {kind} misclassified");
    }
}
