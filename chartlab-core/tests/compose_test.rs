//! End-to-end chart composition: CSV text → classified trades → figure JSON.

use chartlab_core::chart::{
    compose, ChartLayoutPlan, ChartRequest, ChartStyle, LayerKind, SeriesRole,
};
use chartlab_core::data::{read_price_csv, read_trade_csv};
use chartlab_core::indicators::{compute_macd, MacdParams};
use chartlab_core::trades::TradeEventClassifier;
use chartlab_core::{build_figure, ChartConfig, ChartError};

const PRICES: &str = "\
timestamp,open,high,low,close,volume
2024-03-01,100,101,99,100,1000
2024-03-04,100,103,99.5,102,1200
2024-03-05,102,102.5,100,101,900
2024-03-06,101,105.5,101,105,1500
2024-03-07,105,107.5,104,107,1800
2024-03-08,107,107.2,105,106,1100
2024-03-11,106,108.5,105.5,108,1300
2024-03-12,108,110.5,107.5,110,1600
";

const TRADES: &str = "\
Time,Action,Price / share,Total,Result
2024-03-07T14:00:00Z,Market sell,107.1,1071,35.5
2024-03-04 10:15:00,Market buy,101.9,1019,
2024-03-05,Deposit,0,5000,
2024-03-06 09:30:00,Limit buy,101.5,2030,
2024-03-11 15:59:00,Limit sell,108.2,2164,13.4
";

#[test]
fn full_chart_from_csv_text() {
    let series = read_price_csv(PRICES.as_bytes()).unwrap();
    let raw = read_trade_csv(TRADES.as_bytes()).unwrap();
    let config = ChartConfig {
        ticker: "ACME".into(),
        ema_periods: vec![3, 5],
        macd: Some(MacdParams::new(3, 6, 2)),
        show_volume: true,
        excluded_actions: vec!["Deposit".into()],
        ..ChartConfig::default()
    };

    let fig = build_figure(&config, &series, Some(&raw)).unwrap();

    assert_eq!(fig.title, "ACME Price with MACD");
    assert_eq!(
        fig.layout.titles(),
        vec!["ACME Price", "MACD", "MACD Histogram", "Volume"]
    );

    let names: Vec<&str> = fig.layers.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "ACME Price",
            "EMA_3",
            "EMA_5",
            "Market buy",
            "Market sell",
            "Limit buy",
            "Limit sell",
            "Fast MACD Line",
            "Slow Signal Line",
            "MACD Histogram",
            "Volume",
        ]
    );

    // The offset timestamp is normalized to UTC and keeps its tooltip data.
    match &fig.layer("Market sell").unwrap().kind {
        LayerKind::Markers { markers, .. } => {
            assert_eq!(markers[0].x.to_string(), "2024-03-07 14:00:00");
            assert_eq!(markers[0].total, 1071.0);
            assert_eq!(markers[0].result, Some(35.5));
        }
        other => panic!("expected markers, got {other:?}"),
    }
    assert_eq!(fig.layers_in(1).count(), 7);
    assert_eq!(fig.layers_in(2).count(), 2);
}

#[test]
fn figure_json_has_renderer_fields() {
    let series = read_price_csv(PRICES.as_bytes()).unwrap();
    let config = ChartConfig {
        candlestick: false,
        ema_periods: vec![],
        ..ChartConfig::default()
    };
    let fig = build_figure(&config, &series, None).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fig.to_json().unwrap()).unwrap();

    assert_eq!(json["title"], "Price");
    assert_eq!(json["width"], 1200);
    assert_eq!(json["height"], 900);
    assert_eq!(json["x_tick_format"], "%Y-%m-%d");
    assert_eq!(json["show_range_slider"], false);
    assert_eq!(json["layout"]["vertical_spacing"], 0.1);

    let price = &json["layers"][0];
    assert_eq!(price["name"], "Close Price");
    assert_eq!(price["type"], "line");
    assert_eq!(price["role"], "price");
    assert_eq!(price["style"]["color"], "blue");
    assert_eq!(price["y"].as_array().unwrap().len(), 8);
}

#[test]
fn composer_accepts_macd_built_from_lines() {
    let series = read_price_csv(PRICES.as_bytes()).unwrap();
    let full = compute_macd(&series, 3, 6, 2).unwrap();
    let rebuilt = chartlab_core::indicators::MacdResult::from_lines(
        Some(full.fast_line().clone()),
        Some(full.signal_line().clone()),
    )
    .unwrap();
    let layout = ChartLayoutPlan::plan(true, false);
    let fig = compose(
        &ChartRequest::new(&series, &layout)
            .macd(&rebuilt)
            .style(ChartStyle { candlestick: true }),
    )
    .unwrap();
    assert_eq!(fig.layers_with_role(SeriesRole::Histogram).count(), 1);
}

#[test]
fn classified_trades_feed_the_composer_directly() {
    let series = read_price_csv(PRICES.as_bytes()).unwrap();
    let raw = read_trade_csv(TRADES.as_bytes()).unwrap();
    let events = TradeEventClassifier::default().classify(&raw).unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0].action.label(), "Market buy");

    let layout = ChartLayoutPlan::plan(false, false);
    let fig = compose(&ChartRequest::new(&series, &layout).trades(&events)).unwrap();
    // "Deposit" is classified but never drawn.
    assert_eq!(fig.layers_with_role(SeriesRole::TradeMarkers).count(), 4);
}

#[test]
fn unordered_price_csv_is_rejected() {
    let csv = "\
timestamp,open,high,low,close,volume
2024-03-04,1,1,1,1,1
2024-03-01,1,1,1,1,1
";
    let err = read_price_csv(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, ChartError::MalformedInput(_)));
}

#[test]
fn macd_layout_without_macd_is_rejected() {
    let series = read_price_csv(PRICES.as_bytes()).unwrap();
    let layout = ChartLayoutPlan::plan(true, false);
    let err = compose(&ChartRequest::new(&series, &layout)).unwrap_err();
    assert!(err
        .to_string()
        .contains("plot_macd requires both fast and slow series"));
}
