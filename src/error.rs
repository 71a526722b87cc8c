use crate::transfer::TransferReport;

/// Run-level failures of a transfer.
///
/// Per-track search or insert failures are not errors, they end up as
/// [`TransferStatus::Failed`](crate::transfer::TransferStatus::Failed) in the report.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not signed in to the destination catalog")]
    Unauthenticated,

    #[error(
        "time budget exceeded after {} of {total} tracks",
        .report.processed_count
    )]
    TimedOut {
        /// Results of the tracks processed before the deadline
        report: Box<TransferReport>,
        total: usize,
    },

    #[error("source catalog request failed: {0:#}")]
    Source(anyhow::Error),

    #[error("destination catalog request failed: {0:#}")]
    Destination(anyhow::Error),
}
