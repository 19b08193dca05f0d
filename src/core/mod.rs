pub mod access;
pub mod allocator;
pub mod handoff;
pub mod redeemer;
pub mod workflow;

pub use crate::domain::model::{Operator, Portal, PrinterType, Roll, Voucher};
pub use crate::domain::ports::{ClaimOutcome, PortalDirectory, VoucherStore};
pub use crate::utils::error::Result;
