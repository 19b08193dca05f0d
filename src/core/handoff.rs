use url::form_urlencoded;

use crate::domain::model::{PortalId, PrinterType, RollId, VoucherId};

/// Path of the print endpoint for a claimed batch.
pub fn print_path(portal: PortalId, roll: RollId, printer_type: PrinterType) -> String {
    format!("/portals/{portal}/rolls/{roll}/print/{printer_type}")
}

/// Redirect target for a fresh allocation: the print path plus one `v`
/// pair per claimed voucher. The URL alone carries the whole claim; the
/// print step re-checks every id against storage, so the list needs no
/// protection beyond that.
pub fn print_url(
    portal: PortalId,
    roll: RollId,
    printer_type: PrinterType,
    voucher_ids: &[VoucherId],
) -> String {
    let path = print_path(portal, roll, printer_type);
    if voucher_ids.is_empty() {
        return path;
    }

    let mut query = form_urlencoded::Serializer::new(String::new());
    for id in voucher_ids {
        query.append_pair("v", &id.to_string());
    }
    format!("{}?{}", path, query.finish())
}

/// Reads the repeated `v` parameters out of a raw query string. Values that
/// do not parse as ids are dropped; they cannot name a voucher.
pub fn voucher_ids_from_query(query: &str) -> Vec<VoucherId> {
    form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "v")
        .filter_map(|(_, value)| value.parse().ok())
        .collect()
}
