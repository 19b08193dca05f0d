// Domain layer: core models, the voucher filter query and collaborator ports.

pub mod model;
pub mod ports;
pub mod query;
