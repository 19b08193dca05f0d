use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::domain::model::{Portal, PortalId};
use crate::domain::ports::PortalDirectory;
use crate::utils::error::Result;

/// Portal directory served by an external administration service.
///
/// Expects `GET {base}/portals` to return a JSON array of portals and
/// `GET {base}/portals/{id}` to return one portal or 404.
#[derive(Clone)]
pub struct HttpDirectory {
    client: Client,
    base: String,
}

impl HttpDirectory {
    pub fn new(base: &str) -> Self {
        Self {
            client: Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PortalDirectory for HttpDirectory {
    async fn portal(&self, id: PortalId) -> Result<Option<Portal>> {
        let url = format!("{}/portals/{}", self.base, id);
        debug!("Fetching portal from: {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let portal = response.error_for_status()?.json::<Portal>().await?;
        Ok(Some(portal))
    }

    async fn portals(&self) -> Result<Vec<Portal>> {
        let url = format!("{}/portals", self.base);
        debug!("Fetching portal list from: {}", url);

        let response = self.client.get(&url).send().await?;
        let portals = response.error_for_status()?.json::<Vec<Portal>>().await?;
        Ok(portals)
    }
}
