use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adapters::render::{renderer_for, DocumentRenderer};
use crate::core::{access, allocator, handoff, redeemer};
use crate::domain::model::{Operator, Portal, PortalId, PrinterType, PrintJob, RollId};
use crate::domain::ports::{PortalDirectory, VoucherStore};
use crate::utils::error::{Result, VoucherError};

/// Quantity a fresh selection form offers.
pub const DEFAULT_FORM_QUANTITY: u32 = 5;

/// Portal fields exposed to operators. Group configuration stays internal.
#[derive(Debug, Clone, Serialize)]
pub struct PortalView {
    pub id: PortalId,
    pub name: String,
}

impl From<&Portal> for PortalView {
    fn from(portal: &Portal) -> Self {
        Self {
            id: portal.id,
            name: portal.name.clone(),
        }
    }
}

/// Selection form fields as submitted. Values stay raw strings so a
/// rejected form can echo exactly what was typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionForm {
    pub printer_type: String,
    pub quantity: String,
    pub roll_id: String,
}

/// Context for a fresh selection form.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionFormContext {
    pub portal: PortalView,
    pub quantity: u32,
}

/// Context for re-showing the form after a rejected submission.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionRetry {
    pub portal: PortalView,
    pub printer_type: String,
    pub quantity: String,
    pub roll_id: String,
    pub error: String,
}

/// What a submission leads to.
#[derive(Debug, Clone)]
pub enum SelectionOutcome {
    /// Claim succeeded; the caller should follow this print URL.
    Redirect(String),
    /// A validation failed; show the form again, fields as typed.
    Retry(SelectionRetry),
}

/// The selection and print workflow over pluggable storage and directory.
pub struct PrintWorkflow {
    store: Arc<dyn VoucherStore>,
    directory: Arc<dyn PortalDirectory>,
}

impl PrintWorkflow {
    pub fn new(store: Arc<dyn VoucherStore>, directory: Arc<dyn PortalDirectory>) -> Self {
        Self { store, directory }
    }

    /// Active portals this operator may print for.
    pub async fn portals(&self, operator: &Operator) -> Result<Vec<PortalView>> {
        let portals = access::visible_portals(self.directory.as_ref(), &operator.groups).await?;
        Ok(portals.iter().map(PortalView::from).collect())
    }

    /// Fresh form context with the default quantity prefilled.
    pub async fn selection_form(
        &self,
        portal_id: PortalId,
        operator: &Operator,
    ) -> Result<SelectionFormContext> {
        let portal =
            access::require_portal(self.directory.as_ref(), portal_id, &operator.groups).await?;
        Ok(SelectionFormContext {
            portal: PortalView::from(&portal),
            quantity: DEFAULT_FORM_QUANTITY,
        })
    }

    /// Claims vouchers per the submitted form. Success hands back a print
    /// URL carrying the claimed ids; the print step re-verifies every one
    /// of them.
    pub async fn select(
        &self,
        portal_id: PortalId,
        operator: &Operator,
        form: SelectionForm,
    ) -> Result<SelectionOutcome> {
        let portal =
            access::require_portal(self.directory.as_ref(), portal_id, &operator.groups).await?;

        // A roll id that is not even numeric cannot name a roll.
        let Ok(roll_id) = form.roll_id.trim().parse::<RollId>() else {
            return Err(VoucherError::NotFound);
        };

        let allocation = allocator::allocate(
            self.store.as_ref(),
            roll_id,
            &form.printer_type,
            &form.quantity,
            operator,
            Utc::now(),
        )
        .await;

        match allocation {
            Ok(allocation) => {
                let url = handoff::print_url(
                    portal.id,
                    allocation.roll.id,
                    allocation.printer_type,
                    &allocation.voucher_ids,
                );
                info!(
                    portal = portal.id,
                    roll = allocation.roll.id,
                    count = allocation.voucher_ids.len(),
                    "Selection complete, handing off to print"
                );
                Ok(SelectionOutcome::Redirect(url))
            }
            Err(VoucherError::ValidationError { reason, .. }) => {
                Ok(SelectionOutcome::Retry(SelectionRetry {
                    portal: PortalView::from(&portal),
                    printer_type: form.printer_type,
                    quantity: form.quantity,
                    roll_id: form.roll_id,
                    error: reason,
                }))
            }
            Err(other) => Err(other),
        }
    }

    /// Verifies a handed-off id list and renders the surviving codes with
    /// the requested layout. `raw_query` is the query string of the print
    /// URL; `printer_type` is taken as written there, unknown values fall
    /// back to the letter layout.
    pub async fn render(
        &self,
        portal_id: PortalId,
        roll_id: RollId,
        printer_type: &str,
        raw_query: &str,
        operator: &Operator,
    ) -> Result<String> {
        let portal =
            access::require_portal(self.directory.as_ref(), portal_id, &operator.groups).await?;

        let voucher_ids = handoff::voucher_ids_from_query(raw_query);
        let redemption =
            redeemer::redeem(self.store.as_ref(), roll_id, &voucher_ids, Utc::now()).await?;

        let printer_type = PrinterType::parse_or_fallback(printer_type);
        let job = PrintJob {
            portal,
            roll: redemption.roll,
            printer_type,
            codes: redemption.codes,
        };
        Ok(renderer_for(printer_type).render(&job))
    }
}
