//! The arrival feed processor.
//!
//! Turns one raw predictor response into a `FeedResult`:
//! status check, typed parse, actionable filter, stable sort, countdown
//! and marker derivation. Pure apart from logging.

use tracing::{debug, warn};

use crate::domain::{Countdown, MarkerDescriptor};
use crate::predictor::{PredictorError, RawResponse, parse_error_body, parse_predictions};

use super::config::FeedPolicy;
use super::result::{FeedResult, FeedSnapshot};

/// Processes raw predictor responses under a filtering policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedProcessor {
    policy: FeedPolicy,
}

impl FeedProcessor {
    /// Create a processor with the given policy.
    pub fn new(policy: FeedPolicy) -> Self {
        Self { policy }
    }

    /// Process the outcome of a fetch, including transport failures.
    pub fn process_outcome(&self, outcome: Result<&RawResponse, &PredictorError>) -> FeedResult {
        match outcome {
            Ok(raw) => self.process(raw),
            Err(e) => {
                warn!(error = %e, "prediction request failed");
                FeedResult::NetworkError {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Process one raw response.
    pub fn process(&self, raw: &RawResponse) -> FeedResult {
        if !raw.is_ok() {
            let (error_code, error_message) = parse_error_body(&raw.body);
            warn!(
                status = raw.status,
                code = error_code.as_deref().unwrap_or("-"),
                "predictor returned an error status"
            );
            return FeedResult::Failure {
                status_code: raw.status,
                error_code,
                error_message,
            };
        }

        let parsed = match parse_predictions(&raw.body) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "predictor response did not match schema");
                return FeedResult::Malformed {
                    message: e.to_string(),
                };
            }
        };

        let total = parsed.records.len();
        let mut ordered_records: Vec<_> = parsed
            .records
            .into_iter()
            .filter(|r| self.policy.is_actionable(r.estimated_minutes))
            .collect();

        // `sort_by` is stable, so ties keep their response order.
        ordered_records.sort_by(|a, b| a.estimated_minutes.total_cmp(&b.estimated_minutes));

        debug!(
            total,
            actionable = ordered_records.len(),
            skipped = parsed.skipped,
            "processed predictions"
        );

        let Some(first) = ordered_records.first() else {
            return FeedResult::Empty;
        };

        let next_arrival = Countdown::from_minutes(first.estimated_minutes);
        let markers = ordered_records
            .iter()
            .map(MarkerDescriptor::from_record)
            .collect();

        FeedResult::Success(FeedSnapshot {
            ordered_records,
            next_arrival,
            markers,
            skipped: parsed.skipped,
        })
    }
}

/// Process a raw response under the default policy.
pub fn process(raw: &RawResponse) -> FeedResult {
    FeedProcessor::default().process(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(code: &str, minutes: f64) -> String {
        format!(
            r#"{{"codigo": "{code}", "trip_short_name": "22", "dataHora": 1714568400000,
                "estimated_time_arrival": {minutes}, "latitude": -22.86, "longitude": -43.33}}"#
        )
    }

    fn ok_body(records: &[(&str, f64)]) -> RawResponse {
        let items: Vec<String> = records.iter().map(|(c, m)| record_json(c, *m)).collect();
        RawResponse::new(200, format!(r#"{{"results": [{}]}}"#, items.join(",")))
    }

    fn codes(result: &FeedResult) -> Vec<String> {
        result
            .snapshot()
            .unwrap()
            .ordered_records
            .iter()
            .map(|r| r.route_code.clone())
            .collect()
    }

    #[test]
    fn error_status_yields_failure() {
        let raw = RawResponse::new(404, r#"{"code": "X", "message": "not found"}"#);
        assert_eq!(
            process(&raw),
            FeedResult::Failure {
                status_code: 404,
                error_code: Some("X".into()),
                error_message: Some("not found".into()),
            }
        );
    }

    #[test]
    fn error_status_with_plain_body() {
        let raw = RawResponse::new(502, "Bad Gateway");
        assert_eq!(
            process(&raw),
            FeedResult::Failure {
                status_code: 502,
                error_code: None,
                error_message: None,
            }
        );
    }

    #[test]
    fn empty_results_yield_empty() {
        let raw = RawResponse::new(200, r#"{"results": []}"#);
        assert_eq!(process(&raw), FeedResult::Empty);
    }

    #[test]
    fn nothing_actionable_yields_empty() {
        let raw = ok_body(&[("A", 0.0), ("B", -3.0), ("C", 25.0)]);
        assert_eq!(process(&raw), FeedResult::Empty);
    }

    #[test]
    fn schema_mismatch_yields_malformed() {
        let raw = RawResponse::new(200, r#"{"data": []}"#);
        assert!(matches!(process(&raw), FeedResult::Malformed { .. }));

        let raw = RawResponse::new(200, "");
        assert!(matches!(process(&raw), FeedResult::Malformed { .. }));
    }

    #[test]
    fn filters_and_sorts() {
        let raw = ok_body(&[("A", 6.75), ("B", 2.1), ("C", -0.8), ("D", 21.4), ("E", 11.3)]);
        let result = process(&raw);
        assert_eq!(codes(&result), vec!["B", "A", "E"]);
    }

    #[test]
    fn upper_bound_excludes_far_predictions() {
        let raw = ok_body(&[("NEAR", 3.0), ("FAR", 20.0)]);
        assert_eq!(codes(&process(&raw)), vec!["NEAR"]);

        let lenient = FeedProcessor::new(FeedPolicy::positive_only());
        assert_eq!(codes(&lenient.process(&raw)), vec!["NEAR", "FAR"]);
    }

    #[test]
    fn ties_keep_response_order() {
        let raw = ok_body(&[("X", 5.0), ("Y", 1.0), ("Z", 5.0), ("W", 5.0)]);
        assert_eq!(codes(&process(&raw)), vec!["Y", "X", "Z", "W"]);
    }

    #[test]
    fn countdown_from_first_record() {
        let raw = ok_body(&[("A", 9.0), ("B", 7.5)]);
        let result = process(&raw);
        let snapshot = result.snapshot().unwrap();
        assert_eq!(snapshot.next_arrival.minutes(), 7);
        assert_eq!(snapshot.next_arrival.seconds(), 30);
        assert_eq!(snapshot.next_arrival.estimated_minutes(), 7.5);
    }

    #[test]
    fn markers_follow_records() {
        let raw = ok_body(&[("A", 9.9), ("B", 0.1)]);
        let result = process(&raw);
        let snapshot = result.snapshot().unwrap();
        let minutes: Vec<u64> = snapshot.markers.iter().map(|m| m.arrival_minutes).collect();
        assert_eq!(minutes, vec![0, 9]);
        assert_eq!(snapshot.markers[1].label, "Arrival time for this BRT: 9 min");
    }

    #[test]
    fn incomplete_records_are_skipped_not_fatal() {
        let body = format!(
            r#"{{"results": [{}, {{"codigo": "BROKEN", "estimated_time_arrival": 1.0}}]}}"#,
            record_json("GOOD", 4.0)
        );
        let result = process(&RawResponse::new(200, body));
        let snapshot = result.snapshot().unwrap();
        assert_eq!(snapshot.ordered_records.len(), 1);
        assert_eq!(snapshot.skipped, 1);
    }

    #[test]
    fn mistyped_records_are_skipped_not_fatal() {
        let body = format!(
            r#"{{"results": [{}, {{"codigo": 47519, "trip_short_name": "22",
                "estimated_time_arrival": 1.0, "latitude": -22.8, "longitude": -43.3}}]}}"#,
            record_json("GOOD", 4.0)
        );
        let result = process(&RawResponse::new(200, body));
        let snapshot = result.snapshot().unwrap();
        assert_eq!(codes(&result), vec!["GOOD"]);
        assert_eq!(snapshot.skipped, 1);
    }

    #[test]
    fn transport_error_yields_network_error() {
        let processor = FeedProcessor::default();
        let error = PredictorError::Io {
            message: "connection reset".into(),
        };
        match processor.process_outcome(Err(&error)) {
            FeedResult::NetworkError { message } => assert!(message.contains("connection reset")),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[test]
    fn bundled_fixture() {
        let body = std::fs::read_to_string("data/mock_predictions/3084BC0001U2.json").unwrap();
        let result = process(&RawResponse::new(200, body));
        assert_eq!(codes(&result), vec!["A47602", "A47519", "A47125"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn body_for(minutes: &[f64]) -> RawResponse {
        let results: Vec<serde_json::Value> = minutes
            .iter()
            .enumerate()
            .map(|(i, m)| {
                serde_json::json!({
                    "codigo": format!("V{i}"),
                    "trip_short_name": "22",
                    "estimated_time_arrival": m,
                    "latitude": -22.85,
                    "longitude": -43.32,
                })
            })
            .collect();
        RawResponse::new(200, serde_json::json!({ "results": results }).to_string())
    }

    proptest! {
        /// Every emitted record is inside the actionable window
        #[test]
        fn only_actionable_records(minutes in prop::collection::vec(-30.0f64..40.0, 0..20)) {
            if let FeedResult::Success(snapshot) = process(&body_for(&minutes)) {
                for r in &snapshot.ordered_records {
                    prop_assert!(r.estimated_minutes > 0.0);
                    prop_assert!(r.estimated_minutes < 16.0);
                }
            }
        }

        /// Output is sorted ascending
        #[test]
        fn sorted_ascending(minutes in prop::collection::vec(-30.0f64..40.0, 0..20)) {
            if let FeedResult::Success(snapshot) = process(&body_for(&minutes)) {
                for pair in snapshot.ordered_records.windows(2) {
                    prop_assert!(pair[0].estimated_minutes <= pair[1].estimated_minutes);
                }
                prop_assert_eq!(snapshot.markers.len(), snapshot.ordered_records.len());
            }
        }

        /// Empty exactly when nothing is actionable
        #[test]
        fn empty_iff_nothing_actionable(minutes in prop::collection::vec(-30.0f64..40.0, 0..20)) {
            let actionable = minutes.iter().filter(|m| **m > 0.0 && **m < 16.0).count();
            let result = process(&body_for(&minutes));
            prop_assert_eq!(result == FeedResult::Empty, actionable == 0);
        }

        /// Processing the same input twice gives identical output
        #[test]
        fn idempotent(minutes in prop::collection::vec(-30.0f64..40.0, 0..20)) {
            let raw = body_for(&minutes);
            let first = process(&raw);
            let second = process(&raw);
            prop_assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
            prop_assert_eq!(first, second);
        }
    }
}
