// Adapters layer: concrete implementations for external systems (storage,
// portal directory, document rendering).

pub mod directory;
pub mod memory;
pub mod render;
