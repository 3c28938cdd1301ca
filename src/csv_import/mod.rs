//! Importing transactions from CSV files.

pub mod csv;
mod import_endpoint;

pub use csv::{CsvParseResult, CsvTransaction, parse_csv};
pub use import_endpoint::{
    ImportState, ImportSummary, import_parsed_transactions, import_transactions_endpoint,
};
