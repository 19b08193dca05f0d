use crate::domain::model::{PrinterType, PrintJob};

/// Renders a verified print job into a printable plain-text document.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, job: &PrintJob) -> String;
}

/// One block per code, separated by form feeds so label stock advances one
/// label per code.
pub struct AddressLabelRenderer;

impl DocumentRenderer for AddressLabelRenderer {
    fn render(&self, job: &PrintJob) -> String {
        let labels: Vec<String> = job
            .codes
            .iter()
            .map(|code| format!("{}\nAccess voucher\n{}\n", job.portal.name, code))
            .collect();
        labels.join("\x0c")
    }
}

/// A letter sheet listing every code under a heading.
pub struct LetterRenderer;

impl DocumentRenderer for LetterRenderer {
    fn render(&self, job: &PrintJob) -> String {
        let mut doc = String::new();
        doc.push_str("ACCESS VOUCHERS\n");
        doc.push_str(&format!("Portal: {}\n", job.portal.name));
        doc.push_str(&format!("Roll: {}\n\n", job.roll.name));
        for (index, code) in job.codes.iter().enumerate() {
            doc.push_str(&format!("{:3}. {}\n", index + 1, code));
        }
        doc.push_str(&format!("\nTotal codes: {}\n", job.codes.len()));
        doc
    }
}

pub fn renderer_for(printer_type: PrinterType) -> &'static dyn DocumentRenderer {
    match printer_type {
        PrinterType::AddressLabels => &AddressLabelRenderer,
        PrinterType::Letter => &LetterRenderer,
    }
}
