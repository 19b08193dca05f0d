use crate::domain::model::{ClaimStamp, Portal, PortalId, Roll, RollId, Voucher, VoucherId};
use crate::domain::query::VoucherQuery;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Outcome of an atomic claim attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// Exactly the requested number of vouchers was marked printed.
    Claimed(Vec<VoucherId>),
    /// The roll held fewer available vouchers than requested. Nothing was
    /// marked.
    Insufficient { available: usize },
}

/// Voucher and roll storage.
#[async_trait]
pub trait VoucherStore: Send + Sync {
    async fn roll(&self, id: RollId) -> Result<Option<Roll>>;

    /// How many vouchers of the roll have never been printed.
    async fn available_count(&self, roll: RollId) -> Result<usize>;

    /// Selects up to `quantity` available vouchers of the roll and marks
    /// them printed with `stamp`, as one indivisible transition. Two
    /// concurrent claims must never mark the same voucher.
    async fn claim_available(
        &self,
        roll: RollId,
        quantity: usize,
        stamp: ClaimStamp,
    ) -> Result<ClaimOutcome>;

    /// All vouchers matching the query.
    async fn find(&self, query: VoucherQuery) -> Result<Vec<Voucher>>;
}

/// Source of portal definitions, including which groups may print for each.
#[async_trait]
pub trait PortalDirectory: Send + Sync {
    async fn portal(&self, id: PortalId) -> Result<Option<Portal>>;
    async fn portals(&self) -> Result<Vec<Portal>>;
}
