//! Picking the azurerm type of an ARM resource whose type maps onto several of them.

use std::collections::HashMap;

use aztft_core::armid::ResourceId;
use lazy_static::lazy_static;

use crate::{
    client::ClientBuilder,
    error::{Error, Result},
};

mod backup;
mod data_factory_dataset;
mod virtual_machine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    VirtualMachine,
    VirtualMachineScaleSet,
    DevTestVirtualMachine,
    DataFactoryDataset,
    DataProtectionBackupInstance,
    RecoveryServicesBackupPolicy,
}

lazy_static! {
    /// Keyed by upper-cased ARM type.
    static ref RESOLVERS: HashMap<&'static str, Resolver> = HashMap::from([
        ("MICROSOFT.COMPUTE/VIRTUALMACHINES", Resolver::VirtualMachine),
        ("MICROSOFT.COMPUTE/VIRTUALMACHINESCALESETS", Resolver::VirtualMachineScaleSet),
        ("MICROSOFT.DEVTESTLAB/LABS/VIRTUALMACHINES", Resolver::DevTestVirtualMachine),
        ("MICROSOFT.DATAFACTORY/FACTORIES/DATASETS", Resolver::DataFactoryDataset),
        ("MICROSOFT.DATAPROTECTION/BACKUPVAULTS/BACKUPINSTANCES", Resolver::DataProtectionBackupInstance),
        ("MICROSOFT.RECOVERYSERVICES/VAULTS/BACKUPPOLICIES", Resolver::RecoveryServicesBackupPolicy),
    ]);
}

pub fn resolver_for(id: &ResourceId) -> Option<Resolver> {
    RESOLVERS.get(id.type_string().to_uppercase().as_str()).copied()
}

/// Whether the azurerm type of `id` depends on live state.
pub fn is_polymorphic(id: &ResourceId) -> bool {
    resolver_for(id).is_some()
}

/// Fetches the resource behind `id` and classifies it. Retrieval failures are returned as they
/// are; retrying is up to the caller.
pub async fn resolve_polymorphic_type(clients: &ClientBuilder, id: &ResourceId) -> Result<&'static str> {
    let resolver = resolver_for(id).ok_or_else(|| Error::NoResolver(id.type_string()))?;
    tracing::debug!("Resolving the type of {} with {:?}", id, resolver);

    let resource_type = match resolver {
        Resolver::VirtualMachine => virtual_machine::resolve_virtual_machine(clients, id).await?,
        Resolver::VirtualMachineScaleSet => virtual_machine::resolve_virtual_machine_scale_set(clients, id).await?,
        Resolver::DevTestVirtualMachine => virtual_machine::resolve_dev_test_virtual_machine(clients, id).await?,
        Resolver::DataFactoryDataset => data_factory_dataset::resolve_data_factory_dataset(clients, id).await?,
        Resolver::DataProtectionBackupInstance => backup::resolve_backup_instance(clients, id).await?,
        Resolver::RecoveryServicesBackupPolicy => backup::resolve_backup_policy(clients, id).await?,
    };

    tracing::debug!("{} resolved to {}", id, resource_type);
    Ok(resource_type)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{catalog::Catalog, client::MockTransport};

    const VM: &str = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachines/vm1";

    #[test]
    fn test_is_polymorphic() {
        let vm = ResourceId::parse(&VM.to_lowercase()).unwrap();
        assert!(is_polymorphic(&vm));
        assert_eq!(resolver_for(&vm), Some(Resolver::VirtualMachine));

        let subnet = ResourceId::parse(
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Network/virtualNetworks/v1/subnets/sn1",
        )
        .unwrap();
        assert!(!is_polymorphic(&subnet));
    }

    #[tokio::test]
    async fn test_resolve_polymorphic_type() {
        let mock = MockTransport::new();
        mock.insert(VM, json!({"properties": {"osProfile": {"linuxConfiguration": {}}}}));
        let clients = ClientBuilder::new(Arc::new(mock));

        let resource_type = resolve_polymorphic_type(&clients, &ResourceId::parse(VM).unwrap())
            .await
            .unwrap();
        assert_eq!(resource_type, "azurerm_linux_virtual_machine");
        assert!(Catalog::builtin().lookup(resource_type).is_some());
    }

    #[tokio::test]
    async fn test_no_resolver() {
        let clients = ClientBuilder::new(Arc::new(MockTransport::new()));
        let id = ResourceId::parse("/subscriptions/sub1/resourceGroups/rg1").unwrap();
        assert!(matches!(
            resolve_polymorphic_type(&clients, &id).await,
            Err(Error::NoResolver(_))
        ));
    }
}
