//! Decides which transactions a viewer may see.
//!
//! There are two entry points: [resolve_visible] respects the
//! per-transaction privacy flag, while [resolve_all] feeds the statistics
//! views, which deliberately include every household member's transactions
//! so the numbers are the same no matter who is looking.

use serde::Serialize;

use crate::{transaction::TransactionWithOwner, user::UserId};

/// A transaction annotated with whether the viewer owns it.
///
/// The annotation only exists in API responses, it is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedTransaction {
    /// The transaction and its owner's display name.
    #[serde(flatten)]
    pub transaction: TransactionWithOwner,
    /// Whether the viewer owns this transaction.
    pub is_owner: bool,
}

/// The transactions `viewer` may see: their own plus every public one, each
/// annotated with ownership.
///
/// Input order is preserved and the input is never mutated.
pub fn resolve_visible(
    viewer: UserId,
    transactions: &[TransactionWithOwner],
) -> Vec<AnnotatedTransaction> {
    transactions
        .iter()
        .filter(|entry| entry.transaction.owner_id == viewer || entry.transaction.is_public)
        .map(|entry| annotate(viewer, entry))
        .collect()
}

/// Every transaction from every owner, annotated with ownership.
///
/// Statistics must be consistent across the household, so this entry point
/// ignores the privacy flag entirely.
pub fn resolve_all(
    viewer: UserId,
    transactions: &[TransactionWithOwner],
) -> Vec<AnnotatedTransaction> {
    transactions
        .iter()
        .map(|entry| annotate(viewer, entry))
        .collect()
}

fn annotate(viewer: UserId, entry: &TransactionWithOwner) -> AnnotatedTransaction {
    AnnotatedTransaction {
        transaction: entry.clone(),
        is_owner: entry.transaction.owner_id == viewer,
    }
}
