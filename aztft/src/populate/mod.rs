//! Deriving the ids of association pseudo-resources from the live configuration of a resource.

use aztft_core::{armid::ResourceId, util::eq_fold};

use crate::{client::ClientBuilder, error::Result};

mod network_interface;

const NETWORK_INTERFACE: &str = "Microsoft.Network/networkInterfaces";

/// Whether `id` is of a type that carries associations.
pub fn has_associations(id: &ResourceId) -> bool {
    eq_fold(&id.type_string(), NETWORK_INTERFACE)
}

/// The association ids hanging off `id`, or nothing for types without associations.
/// Either every association is returned or the call fails.
pub async fn populate_associations(clients: &ClientBuilder, id: &ResourceId) -> Result<Vec<ResourceId>> {
    if !has_associations(id) {
        return Ok(Vec::new());
    }
    let associations = network_interface::populate_network_interface(clients, id).await?;
    tracing::debug!("Populated {} associations for {}", associations.len(), id);
    Ok(associations)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::client::MockTransport;

    #[tokio::test]
    async fn test_types_without_associations() {
        let clients = ClientBuilder::new(Arc::new(MockTransport::new()));
        let vnet = ResourceId::parse("/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Network/virtualNetworks/v1").unwrap();
        assert!(!has_associations(&vnet));
        assert!(populate_associations(&clients, &vnet).await.unwrap().is_empty());
    }
}
