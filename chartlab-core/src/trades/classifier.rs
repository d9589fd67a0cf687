//! Trade-log classification.
//!
//! Raw rows → `TradeEvent`s:
//! 1. parse every timestamp (any failure aborts the whole call)
//! 2. map the action label to buy / sell / unknown
//! 3. drop rows whose raw label is excluded
//! 4. stable sort by timestamp
//!
//! Unknown actions are a classification, not an error. Excluded rows are
//! still parsed, so a malformed excluded row fails the call.

use crate::data::parse_timestamp;
use crate::domain::{RawTradeRecord, TradeAction, TradeEvent, TradeSide};
use crate::error::Result;
use std::collections::BTreeSet;
use tracing::{debug, trace};

#[derive(Debug, Clone, Default)]
pub struct TradeEventClassifier {
    excluded_actions: BTreeSet<String>,
}

impl TradeEventClassifier {
    pub fn new<I, S>(excluded_actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_actions: excluded_actions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn excluded_actions(&self) -> &BTreeSet<String> {
        &self.excluded_actions
    }

    pub fn classify(&self, raw_events: &[RawTradeRecord]) -> Result<Vec<TradeEvent>> {
        classify(raw_events, &self.excluded_actions)
    }
}

/// Classify with an explicit exclusion set.
pub fn classify(
    raw_events: &[RawTradeRecord],
    excluded_actions: &BTreeSet<String>,
) -> Result<Vec<TradeEvent>> {
    let parsed = raw_events
        .iter()
        .enumerate()
        .map(|(i, raw)| classify_record(raw).map_err(|e| e.at_row("trade", i + 1)))
        .collect::<Result<Vec<_>>>()?;

    let mut events: Vec<TradeEvent> = parsed
        .into_iter()
        .filter(|event| !excluded_actions.contains(event.action.label()))
        .collect();
    // Vec::sort_by_key is stable: ties keep input order.
    events.sort_by_key(|event| event.timestamp);

    debug!(
        input = raw_events.len(),
        kept = events.len(),
        unknown = events.iter().filter(|e| e.side == TradeSide::Unknown).count(),
        "classified trade log"
    );
    Ok(events)
}

fn classify_record(raw: &RawTradeRecord) -> Result<TradeEvent> {
    let timestamp = parse_timestamp(&raw.time)?;
    let action = TradeAction::parse(&raw.action);
    let side = action.side();
    trace!(%timestamp, action = %action, ?side, "classified trade");
    Ok(TradeEvent {
        timestamp,
        action,
        side,
        price: raw.price,
        total: raw.total,
        result: raw.result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;

    fn raw(time: &str, action: &str, price: f64) -> RawTradeRecord {
        RawTradeRecord {
            time: time.into(),
            action: action.into(),
            price,
            total: price * 10.0,
            result: None,
        }
    }

    #[test]
    fn maps_actions_to_sides() {
        let events = TradeEventClassifier::default()
            .classify(&[
                raw("2024-01-02T10:00:00", "Market buy", 1.0),
                raw("2024-01-03T10:00:00", "Limit buy", 2.0),
                raw("2024-01-04T10:00:00", "Market sell", 3.0),
                raw("2024-01-05T10:00:00", "Limit sell", 4.0),
                raw("2024-01-06T10:00:00", "Dividend", 5.0),
            ])
            .unwrap();
        let sides: Vec<TradeSide> = events.iter().map(|e| e.side).collect();
        assert_eq!(
            sides,
            vec![
                TradeSide::Buy,
                TradeSide::Buy,
                TradeSide::Sell,
                TradeSide::Sell,
                TradeSide::Unknown
            ]
        );
        assert_eq!(events[4].action, TradeAction::Other("Dividend".into()));
    }

    #[test]
    fn drops_excluded_raw_labels() {
        let classifier = TradeEventClassifier::new(["Deposit", "Limit sell"]);
        let events = classifier
            .classify(&[
                raw("2024-01-02", "Deposit", 0.0),
                raw("2024-01-03", "Market buy", 1.0),
                raw("2024-01-04", "Limit sell", 2.0),
                raw("2024-01-05", "Market sell", 3.0),
            ])
            .unwrap();
        let labels: Vec<&str> = events.iter().map(|e| e.action.label()).collect();
        assert_eq!(labels, vec!["Market buy", "Market sell"]);
    }

    #[test]
    fn sorts_by_time_keeping_tie_order() {
        let events = TradeEventClassifier::default()
            .classify(&[
                raw("2024-01-05T10:00:00", "Market sell", 1.0),
                raw("2024-01-02T10:00:00", "Market buy", 2.0),
                raw("2024-01-02T10:00:00", "Limit buy", 3.0),
                raw("2024-01-03T10:00:00", "Market buy", 4.0),
            ])
            .unwrap();
        let prices: Vec<f64> = events.iter().map(|e| e.price).collect();
        assert_eq!(prices, vec![2.0, 3.0, 4.0, 1.0]);
    }

    #[test]
    fn malformed_timestamp_fails_the_call() {
        let err = TradeEventClassifier::new(["Deposit"])
            .classify(&[
                raw("2024-01-02", "Market buy", 1.0),
                raw("not a date", "Deposit", 0.0),
            ])
            .unwrap_err();
        assert!(matches!(err, ChartError::MalformedInput(_)));
        assert!(err.to_string().contains("trade row 2"));
    }

    #[test]
    fn free_function_matches_classifier() {
        let rows = [
            raw("2024-01-03", "Market buy", 1.0),
            raw("2024-01-02", "Deposit", 0.0),
        ];
        let excluded: BTreeSet<String> = ["Deposit".to_string()].into();
        assert_eq!(
            classify(&rows, &excluded).unwrap(),
            TradeEventClassifier::new(["Deposit"]).classify(&rows).unwrap()
        );
    }

    #[test]
    fn free_function_borrows_exclusions() {
        let excluded: BTreeSet<String> = ["Deposit".to_string()].into();
        let rows = [
            raw("2024-01-04", "Market sell", 2.0),
            raw("2024-01-02", "Deposit", 0.0),
            raw("2024-01-03", "Market buy", 1.0),
        ];
        let first = classify(&rows, &excluded).unwrap();
        let second = classify(&rows, &excluded).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|e| e.price).collect::<Vec<_>>(),
            vec![1.0, 2.0]
        );
        assert_eq!(excluded.len(), 1);
    }

    #[test]
    fn empty_log_is_empty() {
        assert!(TradeEventClassifier::default().classify(&[]).unwrap().is_empty());
    }
}
