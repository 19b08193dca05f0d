use chrono::{DateTime, Utc};

use crate::domain::model::{RollId, Voucher, VoucherId};

/// Conjunctive voucher filter. Builder methods consume the query and return
/// a new value, so a query can never be half-mutated by two call sites. An
/// empty query matches every voucher.
#[derive(Debug, Clone, Default)]
pub struct VoucherQuery {
    ids: Option<Vec<VoucherId>>,
    roll: Option<RollId>,
    printed: Option<bool>,
    printed_after: Option<DateTime<Utc>>,
}

impl VoucherQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to vouchers whose id is in the list.
    pub fn ids(mut self, ids: Vec<VoucherId>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Restrict to vouchers of one roll.
    pub fn roll(mut self, roll: RollId) -> Self {
        self.roll = Some(roll);
        self
    }

    /// Restrict to vouchers that have been printed.
    pub fn printed(mut self) -> Self {
        self.printed = Some(true);
        self
    }

    /// Restrict to vouchers that have never been printed.
    pub fn unprinted(mut self) -> Self {
        self.printed = Some(false);
        self
    }

    /// Restrict to vouchers printed strictly after `cutoff`. Vouchers that
    /// were never printed cannot pass this filter.
    pub fn printed_after(mut self, cutoff: DateTime<Utc>) -> Self {
        self.printed_after = Some(cutoff);
        self
    }

    /// Whether a voucher passes every filter that has been set.
    pub fn matches(&self, voucher: &Voucher) -> bool {
        if let Some(ids) = &self.ids {
            if !ids.contains(&voucher.id) {
                return false;
            }
        }
        if let Some(roll) = self.roll {
            if voucher.roll != roll {
                return false;
            }
        }
        if let Some(printed) = self.printed {
            if voucher.printed_at.is_some() != printed {
                return false;
            }
        }
        if let Some(cutoff) = self.printed_after {
            match voucher.printed_at {
                Some(printed_at) if printed_at > cutoff => {}
                _ => return false,
            }
        }
        true
    }
}
