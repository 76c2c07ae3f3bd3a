use perpbook::config::{Config, DatasetSource, MatchingMode};
use perpbook::engine::Matcher;
use perpbook::source::memory::sample_records;
use perpbook::source::{self, CsvTableSource, JsonFileSource};
use perpbook::{Decimal, Session, SourceError};
use std::collections::HashMap;
use tempfile::TempDir;

const TABLE: &str = "\
Date,Market & Side,Size,Collateral,Type,Price,PnL
23/04 12:28,ETH/USD Short 5.0x,\"400,558\",\"136,794.50 USDC\",Close,1789.19,\"-$32,032.87\"
22/04 14:06,ETH/USD Short 5.0x,\"400,558\",\"136,794.50 USDC\",Open,1707.55,
22/04 12:44,SOL/USD Long 39.0x,\"15,473.1\",57600 USDC,Close,144.708,\"+$9,643.72\"
";

fn d(s: &str) -> Decimal {
    Decimal::from_str_canonical(s).unwrap()
}

#[tokio::test]
async fn csv_table_renders_a_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.csv");
    std::fs::write(&path, TABLE).unwrap();

    let session = Session::load(&CsvTableSource::new(&path), Matcher::Heuristic, 2023)
        .await
        .unwrap();

    assert_eq!(session.events().len(), 3);
    let trades = &session.dashboard().trades;
    assert_eq!(trades.len(), 2);

    assert_eq!(trades[0].market.as_str(), "ETH/USD");
    assert_eq!(trades[0].entry_price, Some(d("1707.55")));
    assert_eq!(trades[0].close_price, d("1789.19"));
    assert_eq!(trades[0].size_usd, d("400558"));
    assert_eq!(trades[0].pnl, d("-32032.87"));

    assert_eq!(trades[1].market.as_str(), "SOL/USD");
    assert_eq!(trades[1].entry_price, None);
    assert_eq!(trades[1].pnl, d("9643.72"));
}

#[tokio::test]
async fn json_file_with_fifo_matching() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trades.json");
    std::fs::write(
        &path,
        r#"[
            {"date": "02/05", "time": "10:00", "market": "BTC/USD", "side": "Long",
             "size": 1, "collateral": 100, "operationType": "Open", "closePrice": 200},
            {"date": "03/05", "time": "10:00", "market": "BTC/USD", "side": "Long",
             "size": 1, "collateral": 100, "operationType": "Close", "closePrice": 210, "pnl": 10},
            {"date": "01/05", "time": "10:00", "market": "BTC/USD", "side": "Long",
             "size": 1, "collateral": 100, "operationType": "Open", "closePrice": 100}
        ]"#,
    )
    .unwrap();

    let source = JsonFileSource::new(&path);
    let fifo = Session::load(&source, Matcher::Fifo { calendar_year: 2023 }, 2023)
        .await
        .unwrap();
    assert_eq!(fifo.dashboard().trades[0].entry_price, Some(d("100")));

    let heuristic = Session::load(&source, Matcher::Heuristic, 2023).await.unwrap();
    assert_eq!(heuristic.dashboard().trades[0].entry_price, Some(d("200")));
}

#[tokio::test]
async fn malformed_json_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("trades.json");
    std::fs::write(&path, r#"{"trades": []}"#).unwrap();

    let err = Session::load(&JsonFileSource::new(&path), Matcher::Heuristic, 2023)
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::InvalidFormat(_)));
}

#[tokio::test]
async fn config_selects_source() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.csv");
    std::fs::write(&path, TABLE).unwrap();

    let mut env = HashMap::new();
    env.insert(
        "DATASET_PATH".to_string(),
        path.to_string_lossy().to_string(),
    );
    env.insert("MATCHING_MODE".to_string(), "fifo".to_string());
    let config = Config::from_env_map(env).unwrap();
    assert!(matches!(config.dataset, DatasetSource::CsvTable(_)));
    assert_eq!(config.matching_mode, MatchingMode::Fifo);

    let session = Session::load(
        source::from_config(&config).as_ref(),
        config.matcher(),
        config.calendar_year,
    )
    .await
    .unwrap();
    assert_eq!(session.dashboard().trades.len(), 2);
}

#[tokio::test]
async fn default_config_loads_sample() {
    let config = Config::default();
    let session = Session::load(
        source::from_config(&config).as_ref(),
        config.matcher(),
        config.calendar_year,
    )
    .await
    .unwrap();
    let expected = sample_records().len();
    assert_eq!(session.events().len(), expected);
    assert_eq!(session.dashboard().trades.len(), 4);
}
