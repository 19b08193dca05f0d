use std::sync::Arc;

use crate::core::workflow::PrintWorkflow;

/// Shared request state.
pub struct AppState {
    pub workflow: PrintWorkflow,
}

impl AppState {
    pub fn new(workflow: PrintWorkflow) -> Arc<Self> {
        Arc::new(Self { workflow })
    }
}
