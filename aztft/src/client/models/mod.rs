//! The slices of ARM responses aztft reads. Every field is optional: ARM omits what is unset,
//! and a missing field is reported by whoever needed it.

pub mod aad;
pub mod backup;
pub mod compute;
pub mod datafactory;
pub mod desktop;
pub mod keyvault;
pub mod network;
pub mod storage;

use serde::Deserialize;

/// A reference to another resource, e.g. `networkSecurityGroup: { id: "..." }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubResource {
    pub id: Option<String>,
}
