use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::model::{ClaimStamp, Operator, PrinterType, Roll, RollId, VoucherId};
use crate::domain::ports::{ClaimOutcome, VoucherStore};
use crate::utils::error::{Result, VoucherError};

/// Rejection messages shown on the selection form.
pub const INVALID_PRINTER_TYPE: &str = "Invalid printer type";
pub const INVALID_QUANTITY: &str = "Invalid quantity.";
pub const NOT_ENOUGH_VOUCHERS: &str = "Not enough vouchers available.";

/// A successful claim: the roll it came from, the layout to print with and
/// the vouchers now stamped.
#[derive(Debug, Clone)]
pub struct Allocation {
    pub roll: Roll,
    pub printer_type: PrinterType,
    pub voucher_ids: Vec<VoucherId>,
}

fn rejected(field: &str, value: &str, reason: &str) -> VoucherError {
    VoucherError::ValidationError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Claims `quantity` unprinted vouchers from the roll and stamps each with
/// the operator's name and `now`, in one storage transition.
///
/// `printer_type` and `quantity` arrive as the raw form strings; rejections
/// carry them back unchanged so the form can be re-shown as typed. The roll
/// is resolved before any field is validated.
pub async fn allocate<S>(
    store: &S,
    roll_id: RollId,
    printer_type: &str,
    quantity: &str,
    operator: &Operator,
    now: DateTime<Utc>,
) -> Result<Allocation>
where
    S: VoucherStore + ?Sized,
{
    let roll = store.roll(roll_id).await?.ok_or(VoucherError::NotFound)?;

    let parsed_printer_type = PrinterType::parse_strict(printer_type)
        .ok_or_else(|| rejected("printer_type", printer_type, INVALID_PRINTER_TYPE))?;

    let parsed_quantity = match quantity.trim().parse::<i64>() {
        Ok(n) if n >= 1 => n as usize,
        _ => return Err(rejected("quantity", quantity, INVALID_QUANTITY)),
    };

    let stamp = ClaimStamp {
        printed_at: now,
        printed_by: operator.username.clone(),
    };
    match store.claim_available(roll.id, parsed_quantity, stamp).await? {
        ClaimOutcome::Claimed(voucher_ids) => {
            info!(
                roll = roll.id,
                operator = %operator.username,
                count = voucher_ids.len(),
                "Marked vouchers as printed"
            );
            Ok(Allocation {
                roll,
                printer_type: parsed_printer_type,
                voucher_ids,
            })
        }
        ClaimOutcome::Insufficient { available } => {
            debug!(
                roll = roll.id,
                requested = parsed_quantity,
                available,
                "Not enough unprinted vouchers"
            );
            Err(rejected("quantity", quantity, NOT_ENOUGH_VOUCHERS))
        }
    }
}
