use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type PortalId = u64;
pub type RollId = u64;
pub type VoucherId = u64;
pub type GroupId = String;

/// A captive portal vouchers get printed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    pub id: PortalId,
    pub name: String,
    pub active: bool,
    /// Groups whose members may print vouchers for this portal.
    pub allow_printing: Vec<GroupId>,
}

impl Portal {
    /// Whether any of the given groups is allowed to print here.
    pub fn allows(&self, groups: &[GroupId]) -> bool {
        self.allow_printing.iter().any(|g| groups.contains(g))
    }
}

/// A batch of voucher codes loaded together.
#[derive(Debug, Clone, PartialEq)]
pub struct Roll {
    pub id: RollId,
    pub name: String,
}

/// One printable access code. `printed_at` and `printed_by` are set together
/// exactly once, when the voucher is claimed for printing.
#[derive(Debug, Clone, PartialEq)]
pub struct Voucher {
    pub id: VoucherId,
    pub roll: RollId,
    pub code: String,
    pub printed_at: Option<DateTime<Utc>>,
    pub printed_by: Option<String>,
}

impl Voucher {
    pub fn is_available(&self) -> bool {
        self.printed_at.is_none()
    }
}

/// The staff member driving a request, as asserted by the fronting
/// authentication proxy.
#[derive(Debug, Clone)]
pub struct Operator {
    pub username: String,
    pub groups: Vec<GroupId>,
}

/// The print mark written onto every voucher of one claim.
#[derive(Debug, Clone)]
pub struct ClaimStamp {
    pub printed_at: DateTime<Utc>,
    pub printed_by: String,
}

/// Document layouts the selection form accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterType {
    AddressLabels,
    Letter,
}

/// Layout used when a print URL names a format nobody recognizes. Unknown
/// formats render as letters instead of failing; the codes are already
/// claimed by that point and must still come out of the printer.
pub const UNKNOWN_FORMAT_FALLBACK: PrinterType = PrinterType::Letter;

impl PrinterType {
    /// Parses a format name, rejecting anything unknown. The selection form
    /// uses this so typos are caught before any voucher is claimed.
    pub fn parse_strict(value: &str) -> Option<Self> {
        match value {
            "address_labels" => Some(PrinterType::AddressLabels),
            "letter" => Some(PrinterType::Letter),
            _ => None,
        }
    }

    /// Parses a format name from a print URL, falling back for unknown
    /// values instead of rejecting them.
    pub fn parse_or_fallback(value: &str) -> Self {
        Self::parse_strict(value).unwrap_or(UNKNOWN_FORMAT_FALLBACK)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrinterType::AddressLabels => "address_labels",
            PrinterType::Letter => "letter",
        }
    }
}

impl fmt::Display for PrinterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a renderer needs to produce a printable document.
#[derive(Debug, Clone)]
pub struct PrintJob {
    pub portal: Portal,
    pub roll: Roll,
    pub printer_type: PrinterType,
    pub codes: Vec<String>,
}
