use tracing::debug;

use crate::domain::model::{GroupId, Portal, PortalId};
use crate::domain::ports::PortalDirectory;
use crate::utils::error::{Result, VoucherError};

/// Outcome of the portal authorization check.
#[derive(Debug, Clone)]
pub enum PortalAccess {
    Authorized(Portal),
    /// No detail on purpose. Callers surface this as a plain not-found, so
    /// a denied caller cannot tell a missing portal from a forbidden one.
    Denied,
}

/// The gate in front of every selection and every print. A portal is usable
/// iff it exists, is active, and shares at least one printing group with
/// the operator.
pub async fn authorize_portal<D>(
    directory: &D,
    portal_id: PortalId,
    groups: &[GroupId],
) -> Result<PortalAccess>
where
    D: PortalDirectory + ?Sized,
{
    let Some(portal) = directory.portal(portal_id).await? else {
        debug!(portal = portal_id, "Portal not found");
        return Ok(PortalAccess::Denied);
    };
    if !portal.active {
        debug!(portal = portal_id, "Portal inactive");
        return Ok(PortalAccess::Denied);
    }
    if !portal.allows(groups) {
        debug!(portal = portal_id, "No printing group matched");
        return Ok(PortalAccess::Denied);
    }
    Ok(PortalAccess::Authorized(portal))
}

/// Like `authorize_portal`, but folds denial into the not-found error.
pub async fn require_portal<D>(
    directory: &D,
    portal_id: PortalId,
    groups: &[GroupId],
) -> Result<Portal>
where
    D: PortalDirectory + ?Sized,
{
    match authorize_portal(directory, portal_id, groups).await? {
        PortalAccess::Authorized(portal) => Ok(portal),
        PortalAccess::Denied => Err(VoucherError::NotFound),
    }
}

/// Portals the operator may print for: active and group-authorized.
pub async fn visible_portals<D>(directory: &D, groups: &[GroupId]) -> Result<Vec<Portal>>
where
    D: PortalDirectory + ?Sized,
{
    let portals = directory.portals().await?;
    Ok(portals
        .into_iter()
        .filter(|p| p.active && p.allows(groups))
        .collect())
}
