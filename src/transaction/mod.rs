//! Creating, updating, deleting and querying the transaction ledger.

pub mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;

pub use self::core::{
    Transaction, TransactionData, TransactionId, TransactionWithOwner, create_transaction,
    create_transaction_table, delete_transaction, get_all_transactions, get_transaction,
    get_transactions_for_viewer, update_transaction,
};
pub use create_endpoint::{TransactionForm, create_transaction_endpoint};
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
