use super::{AnchorPolicy, Direction, GroupConfig, JoinConfig, LookaheadFailure};

#[test]
fn group_config_defaults_are_ascending_checked_and_unbounded() {
    let config = GroupConfig::default();

    assert_eq!(config.direction(), Direction::Asc);
    assert!(config.order_check());
    assert_eq!(config.max_group_len(), None);
    assert_eq!(config.lookahead_failure(), LookaheadFailure::CloseRun);
    assert!(!config.debug());
}

#[test]
fn join_config_builders_override_each_policy() {
    let config = JoinConfig::new()
        .with_direction(Direction::Desc)
        .with_order_check(false)
        .with_anchor_policy(AnchorPolicy::Reject)
        .with_max_run_len(64)
        .with_lookahead_failure(LookaheadFailure::Abort)
        .with_debug(true);

    assert_eq!(config.direction(), Direction::Desc);
    assert!(!config.order_check());
    assert_eq!(config.anchor_policy(), AnchorPolicy::Reject);
    assert_eq!(config.max_run_len(), Some(64));
    assert_eq!(config.lookahead_failure(), LookaheadFailure::Abort);
    assert!(config.debug());
}

#[test]
fn partial_config_documents_fill_missing_fields_with_defaults() {
    let config: JoinConfig = serde_json::from_str(r#"{"anchor_policy":"Reject","max_run_len":10}"#)
        .expect("partial join config should deserialize");

    assert_eq!(
        config,
        JoinConfig::new()
            .with_anchor_policy(AnchorPolicy::Reject)
            .with_max_run_len(10)
    );

    let config: GroupConfig =
        serde_json::from_str("{}").expect("empty group config should deserialize");
    assert_eq!(config, GroupConfig::new());
}

#[test]
fn direction_labels_are_stable() {
    assert_eq!(Direction::Asc.to_string(), "ASC");
    assert_eq!(Direction::Desc.to_string(), "DESC");
}
