//! Data ingestion, price tables and indicator export

pub mod csv_io;
pub mod table;
pub mod timestamp;

pub use csv_io::{
    export_indicators_csv, load_price_csv, load_trade_csv, read_price_csv, read_trade_csv,
};
pub use table::PriceTable;
pub use timestamp::parse_timestamp;
