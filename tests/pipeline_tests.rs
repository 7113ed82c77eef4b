use arbiter::binder;
use arbiter::config::ArbiterConfig;
use arbiter::goal;
use arbiter::msg::{Desire, DesireSet};

// Two-strategy catalog used across most tests:
// S1 satisfies kind "A", S2 satisfies kind "B".
fn two_strategy_config() -> ArbiterConfig {
    ArbiterConfig::from_json_str(
        r#"{
            "strategies": [
                { "id": "S1", "utility": { "kind": "A", "value": 1.0 } },
                { "id": "S2", "utility": { "kind": "B", "value": 1.0 } }
            ]
        }"#,
    )
    .expect("catalog must parse")
}

fn set_of(desires: Vec<Desire>) -> DesireSet {
    DesireSet { desires }
}

#[test]
fn test_goal_vector_aligned_with_catalog() {
    let config = two_strategy_config();
    let set = set_of(vec![Desire::simple("d1", "A")]);

    let (goals, unmatched) = goal::convert(&config.catalog, &set);

    assert_eq!(goals.len(), config.catalog.len(), "goal vector must have one entry per strategy");
    assert!(!unmatched);
    assert_eq!(goals[0].demand, 1.0);
    assert_eq!(goals[1].demand, 0.0);
}

#[test]
fn test_same_kind_desires_sum_into_dimension() {
    let config = two_strategy_config();
    let mut d1 = Desire::simple("d1", "A");
    d1.intensity = 1.0;
    let mut d2 = Desire::simple("d2", "A");
    d2.intensity = 2.0;
    let set = set_of(vec![d1, d2]);

    let (goals, _) = goal::convert(&config.catalog, &set);

    assert_eq!(goals[0].demand, 3.0, "same-kind contributions must sum");
}

#[test]
fn test_unmatched_kind_is_flagged_and_skipped() {
    let config = two_strategy_config();
    let set = set_of(vec![
        Desire::simple("d1", "A"),
        Desire::simple("dx", "NoSuchKind"),
    ]);

    let (goals, unmatched) = goal::convert(&config.catalog, &set);

    assert!(unmatched, "unknown desire kind must set the unmatched flag");
    assert_eq!(goals[0].demand, 1.0, "matched desires must still contribute");
    assert_eq!(goals[1].demand, 0.0);
}

#[test]
fn test_security_flag_marks_dimension_required() {
    let config = two_strategy_config();
    let mut d1 = Desire::simple("d1", "A");
    d1.security = true;
    let set = set_of(vec![d1, Desire::simple("d2", "B")]);

    let (goals, _) = goal::convert(&config.catalog, &set);

    assert!(goals[0].required);
    assert!(!goals[1].required);
}

#[test]
fn test_end_to_end_binding_example() {
    // catalog = [S1/A, S2/B]; desires = [d1/A]; activation = [true, false]
    let config = two_strategy_config();
    let set = set_of(vec![Desire::simple("d1", "A")]);

    let out = binder::bind(&config.catalog, &[true, false], &set);

    assert_eq!(out.strategies, vec!["S1", "S2"]);
    assert_eq!(out.desires, vec!["d1", ""]);
    assert_eq!(out.desire_types, vec!["A", ""]);
    assert_eq!(out.enabled, vec![true, false]);
}

#[test]
fn test_first_match_wins_on_same_kind() {
    let config = two_strategy_config();
    let set = set_of(vec![
        Desire::simple("d1", "A"),
        Desire::simple("d2", "A"),
    ]);

    let out = binder::bind(&config.catalog, &[true, false], &set);

    assert_eq!(out.desires[0], "d1", "ties among same-kind desires resolve by input order");
}

#[test]
fn test_disabled_positions_carry_empty_sentinels() {
    let config = two_strategy_config();
    let set = set_of(vec![
        Desire::simple("d1", "A"),
        Desire::simple("d2", "B"),
    ]);

    let out = binder::bind(&config.catalog, &[false, false], &set);

    for i in 0..config.catalog.len() {
        assert!(!out.enabled[i]);
        assert_eq!(out.desires[i], "", "disabled slot must carry the empty sentinel");
        assert_eq!(out.desire_types[i], "", "disabled slot must carry the empty sentinel");
    }
}

#[test]
fn test_activated_without_matching_desire_binds_empty_id() {
    // S2 activated while no desire of kind B exists: the kind is still
    // reported, the bound desire id is the sentinel.
    let config = two_strategy_config();
    let set = set_of(vec![Desire::simple("d1", "A")]);

    let out = binder::bind(&config.catalog, &[true, true], &set);

    assert_eq!(out.desire_types[1], "B");
    assert_eq!(out.desires[1], "");
    assert!(out.enabled[1]);
}

#[test]
fn test_record_is_complete_despite_unmatched_desire() {
    let config = two_strategy_config();
    let set = set_of(vec![
        Desire::simple("dx", "NoSuchKind"),
        Desire::simple("d2", "B"),
    ]);

    let (_, unmatched) = goal::convert(&config.catalog, &set);
    assert!(unmatched);

    let out = binder::bind(&config.catalog, &[false, true], &set);
    assert_eq!(out.strategies.len(), 2, "record must stay complete for all strategies");
    assert_eq!(out.desires, vec!["", "d2"]);
}

#[test]
fn test_convert_then_bind_is_deterministic() {
    let config = two_strategy_config();
    let set = set_of(vec![
        Desire::simple("d1", "A"),
        Desire::simple("d2", "A"),
        Desire::simple("d3", "B"),
    ]);

    let (goals_a, _) = goal::convert(&config.catalog, &set);
    let (goals_b, _) = goal::convert(&config.catalog, &set);
    assert_eq!(goals_a, goals_b, "conversion must be fully determined by the input");

    let out_a = binder::bind(&config.catalog, &[true, true], &set);
    let out_b = binder::bind(&config.catalog, &[true, true], &set);

    // Everything except the stamp must be identical.
    assert_eq!(out_a.strategies, out_b.strategies);
    assert_eq!(out_a.desires, out_b.desires);
    assert_eq!(out_a.desire_types, out_b.desire_types);
    assert_eq!(out_a.enabled, out_b.enabled);
}
