use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::model::{ClaimStamp, Portal, PortalId, Roll, RollId, Voucher, VoucherId};
use crate::domain::ports::{ClaimOutcome, PortalDirectory, VoucherStore};
use crate::domain::query::VoucherQuery;
use crate::utils::error::Result;

struct StoreInner {
    rolls: HashMap<RollId, Roll>,
    vouchers: HashMap<VoucherId, Voucher>,
}

/// In-memory voucher storage. Every read and write goes through one lock,
/// so a claim observes availability and marks vouchers in a single critical
/// section.
#[derive(Clone)]
pub struct MemoryVoucherStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl MemoryVoucherStore {
    pub fn new() -> Self {
        Self::with_data(Vec::new(), Vec::new())
    }

    pub fn with_data(rolls: Vec<Roll>, vouchers: Vec<Voucher>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                rolls: rolls.into_iter().map(|r| (r.id, r)).collect(),
                vouchers: vouchers.into_iter().map(|v| (v.id, v)).collect(),
            })),
        }
    }

    pub async fn insert_roll(&self, roll: Roll) {
        self.inner.lock().await.rolls.insert(roll.id, roll);
    }

    pub async fn insert_voucher(&self, voucher: Voucher) {
        self.inner.lock().await.vouchers.insert(voucher.id, voucher);
    }

    pub async fn voucher(&self, id: VoucherId) -> Option<Voucher> {
        self.inner.lock().await.vouchers.get(&id).cloned()
    }
}

impl Default for MemoryVoucherStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoucherStore for MemoryVoucherStore {
    async fn roll(&self, id: RollId) -> Result<Option<Roll>> {
        Ok(self.inner.lock().await.rolls.get(&id).cloned())
    }

    async fn available_count(&self, roll: RollId) -> Result<usize> {
        let inner = self.inner.lock().await;
        Ok(inner
            .vouchers
            .values()
            .filter(|v| v.roll == roll && v.is_available())
            .count())
    }

    async fn claim_available(
        &self,
        roll: RollId,
        quantity: usize,
        stamp: ClaimStamp,
    ) -> Result<ClaimOutcome> {
        let mut inner = self.inner.lock().await;

        let mut candidates: Vec<VoucherId> = inner
            .vouchers
            .values()
            .filter(|v| v.roll == roll && v.is_available())
            .map(|v| v.id)
            .collect();
        candidates.sort_unstable(); // deterministic selection order

        if candidates.len() < quantity {
            return Ok(ClaimOutcome::Insufficient {
                available: candidates.len(),
            });
        }
        candidates.truncate(quantity);

        for id in &candidates {
            if let Some(voucher) = inner.vouchers.get_mut(id) {
                voucher.printed_at = Some(stamp.printed_at);
                voucher.printed_by = Some(stamp.printed_by.clone());
            }
        }

        Ok(ClaimOutcome::Claimed(candidates))
    }

    async fn find(&self, query: VoucherQuery) -> Result<Vec<Voucher>> {
        let inner = self.inner.lock().await;
        let mut found: Vec<Voucher> = inner
            .vouchers
            .values()
            .filter(|v| query.matches(v))
            .cloned()
            .collect();
        found.sort_unstable_by_key(|v| v.id);
        Ok(found)
    }
}

/// Portal directory backed by a fixed in-memory set, loaded from the seed
/// file at startup.
#[derive(Clone)]
pub struct MemoryDirectory {
    portals: Arc<Vec<Portal>>,
}

impl MemoryDirectory {
    pub fn new(portals: Vec<Portal>) -> Self {
        Self {
            portals: Arc::new(portals),
        }
    }
}

#[async_trait]
impl PortalDirectory for MemoryDirectory {
    async fn portal(&self, id: PortalId) -> Result<Option<Portal>> {
        Ok(self.portals.iter().find(|p| p.id == id).cloned())
    }

    async fn portals(&self) -> Result<Vec<Portal>> {
        Ok(self.portals.as_ref().clone())
    }
}
