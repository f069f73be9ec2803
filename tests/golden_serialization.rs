use chrono::{TimeZone, Utc};
use rank_consensus::aggregation::{AggregatorConfig, IterationSchedule};
use rank_consensus::types::{ConsensusReport, InputFingerprint};
use rank_consensus::{KendallTau, RankAggregator};

fn make_aggregator(config: AggregatorConfig) -> RankAggregator<String> {
    let mut aggregator = RankAggregator::with_config(config);
    for ordering in [
        vec!["https://a.example", "https://b.example", "https://c.example"],
        vec!["https://a.example", "https://b.example", "https://c.example"],
        vec!["https://b.example", "https://a.example", "https://c.example"],
    ] {
        aggregator
            .add_ordering(ordering.into_iter().map(String::from))
            .unwrap();
    }
    aggregator.solve().unwrap();
    aggregator
}

#[test]
fn golden_config_serialization() {
    let json = serde_json::to_string(&AggregatorConfig::v0()).unwrap();

    assert_eq!(
        json,
        r#"{"version":"1","iteration_schedule":{"kind":"fixed","multiplier":2},"sink_boundary_fraction":0.0001}"#
    );

    let converged = AggregatorConfig::v0().with_iteration_schedule(IterationSchedule::Converged {
        tolerance: 0.5,
        max_iterations: 100,
    });
    let json = serde_json::to_string(&converged).unwrap();
    assert!(json.contains(r#""iteration_schedule":{"kind":"converged","tolerance":0.5,"max_iterations":100}"#));

    let back: AggregatorConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, converged);
}

#[test]
fn golden_report_field_order() {
    let aggregator = make_aggregator(AggregatorConfig::v0());
    let report = aggregator.report().unwrap();
    let json_str = serde_json::to_string_pretty(&report).unwrap();

    let ranking_pos = json_str.find("\"ranking\":").expect("Missing ranking key");
    let consensus_pos = json_str.find("\"consensus\":").expect("Missing consensus key");
    assert!(ranking_pos < consensus_pos, "ranking should appear before consensus metadata");

    let item_pos = json_str.find("\"item\":").unwrap();
    let position_pos = json_str.find("\"position\":").unwrap();
    let tier_pos = json_str.find("\"tier\":").unwrap();
    let score_pos = json_str.find("\"score\":").unwrap();
    assert!(item_pos < position_pos);
    assert!(position_pos < tier_pos);
    assert!(tier_pos < score_pos);

    let fp_pos = json_str.find("\"input_fingerprint\":").unwrap();
    let cfg_pos = json_str.find("\"config\":").unwrap();
    let at_pos = json_str.find("\"solved_at\":").unwrap();
    let agree_pos = json_str.find("\"input_agreement\":").unwrap();
    assert!(consensus_pos < fp_pos);
    assert!(fp_pos < cfg_pos);
    assert!(cfg_pos < at_pos);
    assert!(at_pos < agree_pos);
}

#[test]
fn golden_report_contents_and_roundtrip() {
    let aggregator = make_aggregator(AggregatorConfig::v0());
    let report = aggregator.report().unwrap();

    let items: Vec<&str> = report.ranking.iter().map(|r| r.item.as_str()).collect();
    assert_eq!(items, vec!["https://a.example", "https://b.example", "https://c.example"]);
    for (position, ranked) in report.ranking.iter().enumerate() {
        assert_eq!(ranked.position, position);
        assert_eq!(ranked.tier, position);
        assert!((ranked.score - 1.0).abs() < 1e-9);
    }

    let meta = &report.consensus;
    assert_eq!(meta.orderings, 3);
    assert_eq!(meta.items, 3);
    assert_eq!(meta.tiers, 3);
    assert_eq!(meta.config, AggregatorConfig::v0());
    assert!(meta.input_fingerprint.as_str().starts_with("sha256:"));
    assert_eq!(meta.input_fingerprint.as_str().len(), "sha256:".len() + 64);

    let json = serde_json::to_string_pretty(&report).unwrap();
    let back: ConsensusReport<String> = serde_json::from_str(&json).expect("Deserialization failed");
    assert_eq!(back.consensus.input_fingerprint, meta.input_fingerprint);
    assert_eq!(back.consensus.config, meta.config);
    assert_eq!(back.consensus.solved_at, meta.solved_at);
    assert_eq!(back.consensus.input_agreement.len(), 3);
    assert_eq!(back.ranking.len(), report.ranking.len());
    for (parsed, original) in back.ranking.iter().zip(&report.ranking) {
        assert_eq!(parsed.item, original.item);
        assert_eq!(parsed.position, original.position);
        assert_eq!(parsed.tier, original.tier);
        assert!((parsed.score - original.score).abs() < 1e-12);
    }
}

#[test]
fn reports_are_identical_apart_from_solve_time() {
    let first = make_aggregator(AggregatorConfig::v0()).report().unwrap();
    let second = make_aggregator(AggregatorConfig::v0()).report().unwrap();

    let mut first = first;
    let mut second = second;
    let fixed_time = Utc.timestamp_opt(0, 0).unwrap();
    first.consensus.solved_at = fixed_time;
    second.consensus.solved_at = fixed_time;

    let json1 = serde_json::to_string_pretty(&first).unwrap();
    let json2 = serde_json::to_string_pretty(&second).unwrap();
    assert_eq!(json1, json2, "Consensus report is not deterministic");
}

#[test]
fn fingerprint_tracks_inputs_and_config() {
    let config = AggregatorConfig::v0();
    let orderings = vec![vec!["a", "b"], vec!["b"]];

    let base = InputFingerprint::from_inputs(&config, &orderings).unwrap();
    assert_eq!(base, InputFingerprint::from_inputs(&config, &orderings).unwrap());

    let swapped = vec![vec!["b"], vec!["a", "b"]];
    assert_ne!(base, InputFingerprint::from_inputs(&config, &swapped).unwrap());

    let regrouped = vec![vec!["a"], vec!["b", "b"]];
    assert_ne!(base, InputFingerprint::from_inputs(&config, &regrouped).unwrap());

    let tuned = config.with_sink_boundary_fraction(0.01);
    assert_ne!(base, InputFingerprint::from_inputs(&tuned, &orderings).unwrap());
}

#[test]
fn kendall_tau_serialization() {
    let measured = KendallTau {
        misorderings: 2,
        max_orderings: 10,
    };
    let json = serde_json::to_string(&measured).unwrap();
    assert_eq!(json, r#"{"misorderings":2,"max_orderings":10}"#);
}
