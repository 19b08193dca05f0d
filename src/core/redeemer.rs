use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::domain::model::{Roll, RollId, VoucherId};
use crate::domain::ports::VoucherStore;
use crate::domain::query::VoucherQuery;
use crate::utils::error::{Result, VoucherError};

/// How long a claimed batch stays printable. Past this, the print link is
/// dead and the codes stay hidden.
pub fn freshness_window() -> Duration {
    Duration::hours(1)
}

/// The verified outcome of a print request.
#[derive(Debug, Clone, PartialEq)]
pub struct Redemption {
    pub roll: Roll,
    pub codes: Vec<String>,
}

/// Re-validates a handed-off voucher id list and reveals the codes that
/// pass. Ids that do not exist, belong to another roll, were never printed,
/// or were printed more than an hour before `now` are dropped without
/// comment.
///
/// Read-only: replaying a print URL can reveal nothing beyond the original
/// claim, and nothing at all once the hour runs out.
pub async fn redeem<S>(
    store: &S,
    roll_id: RollId,
    voucher_ids: &[VoucherId],
    now: DateTime<Utc>,
) -> Result<Redemption>
where
    S: VoucherStore + ?Sized,
{
    let roll = store.roll(roll_id).await?.ok_or(VoucherError::NotFound)?;

    let cutoff = now - freshness_window();
    let query = VoucherQuery::new()
        .ids(voucher_ids.to_vec())
        .roll(roll.id)
        .printed()
        .printed_after(cutoff);
    let survivors = store.find(query).await?;

    // Codes come back in the order the ids were requested, so a printed
    // sheet is easy to check against the request that produced it.
    let mut seen = HashSet::new();
    let mut codes = Vec::with_capacity(survivors.len());
    for id in voucher_ids {
        if !seen.insert(*id) {
            continue;
        }
        if let Some(voucher) = survivors.iter().find(|v| v.id == *id) {
            codes.push(voucher.code.clone());
        }
    }

    debug!(
        roll = roll.id,
        requested = voucher_ids.len(),
        verified = codes.len(),
        "Verified vouchers for printing"
    );
    Ok(Redemption { roll, codes })
}
