use aztft_core::armid::ResourceId;

use crate::{
    client::{ClientBuilder, models::compute::OsProfile},
    error::{Error, Result},
    util::{client_for, name_at},
};

fn by_os_profile(
    id: &ResourceId,
    os_profile: Option<OsProfile>,
    path: &str,
    linux: &'static str,
    windows: &'static str,
) -> Result<&'static str> {
    let os_profile = os_profile.ok_or_else(|| Error::missing(id, path))?;
    match (os_profile.linux_configuration, os_profile.windows_configuration) {
        (Some(_), _) => Ok(linux),
        (None, Some(_)) => Ok(windows),
        (None, None) => Err(Error::missing(id, &format!("{}.{{linux,windows}}Configuration", path))),
    }
}

pub(super) async fn resolve_virtual_machine(clients: &ClientBuilder, id: &ResourceId) -> Result<&'static str> {
    let (client, resource_group) = client_for(clients, id).await?;
    let vm = client
        .get_virtual_machine(resource_group.name, name_at(id, 0)?)
        .await
        .map_err(Error::retrieval(id))?;
    let props = vm.properties.ok_or_else(|| Error::missing(id, "properties"))?;

    by_os_profile(
        id,
        props.os_profile,
        "properties.osProfile",
        "azurerm_linux_virtual_machine",
        "azurerm_windows_virtual_machine",
    )
}

pub(super) async fn resolve_virtual_machine_scale_set(clients: &ClientBuilder, id: &ResourceId) -> Result<&'static str> {
    let (client, resource_group) = client_for(clients, id).await?;
    let vmss = client
        .get_virtual_machine_scale_set(resource_group.name, name_at(id, 0)?)
        .await
        .map_err(Error::retrieval(id))?;
    let profile = vmss
        .properties
        .ok_or_else(|| Error::missing(id, "properties"))?
        .virtual_machine_profile
        .ok_or_else(|| Error::missing(id, "properties.virtualMachineProfile"))?;

    by_os_profile(
        id,
        profile.os_profile,
        "properties.virtualMachineProfile.osProfile",
        "azurerm_linux_virtual_machine_scale_set",
        "azurerm_windows_virtual_machine_scale_set",
    )
}

pub(super) async fn resolve_dev_test_virtual_machine(clients: &ClientBuilder, id: &ResourceId) -> Result<&'static str> {
    let (client, resource_group) = client_for(clients, id).await?;
    let vm = client
        .get_dev_test_virtual_machine(resource_group.name, name_at(id, 0)?, name_at(id, 1)?)
        .await
        .map_err(Error::retrieval(id))?;
    let os_type = vm
        .properties
        .ok_or_else(|| Error::missing(id, "properties"))?
        .os_type
        .ok_or_else(|| Error::missing(id, "properties.osType"))?;

    match os_type.to_lowercase().as_str() {
        "linux" => Ok("azurerm_dev_test_linux_virtual_machine"),
        "windows" => Ok("azurerm_dev_test_windows_virtual_machine"),
        _ => Err(Error::UnknownDiscriminator {
            id:    id.to_string(),
            field: "properties.osType".to_string(),
            value: os_type,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};

    use super::*;
    use crate::client::MockTransport;

    const VM: &str = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachines/vm1";
    const VMSS: &str = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachineScaleSets/vmss1";
    const LAB_VM: &str = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.DevTestLab/labs/lab1/virtualMachines/vm1";

    fn clients(target: &str, body: Value) -> ClientBuilder {
        let mock = MockTransport::new();
        mock.insert(target, body);
        ClientBuilder::new(Arc::new(mock))
    }

    async fn vm(body: Value) -> Result<&'static str> {
        resolve_virtual_machine(&clients(VM, body), &ResourceId::parse(VM).unwrap()).await
    }

    #[tokio::test]
    async fn test_virtual_machine() {
        assert_eq!(
            vm(json!({"properties": {"osProfile": {"computerName": "vm1", "linuxConfiguration": {"disablePasswordAuthentication": true}}}}))
                .await
                .unwrap(),
            "azurerm_linux_virtual_machine"
        );
        assert_eq!(
            vm(json!({"properties": {"osProfile": {"computerName": "vm1", "windowsConfiguration": {"provisionVMAgent": true}}}}))
                .await
                .unwrap(),
            "azurerm_windows_virtual_machine"
        );
    }

    #[tokio::test]
    async fn test_virtual_machine_missing_fields() {
        match vm(json!({"properties": {"osProfile": {"computerName": "vm1"}}})).await {
            Err(Error::MissingField { field, .. }) => {
                assert_eq!(field, "properties.osProfile.{linux,windows}Configuration")
            }
            other => panic!("unexpected result {:?}", other),
        }
        match vm(json!({"properties": {}})).await {
            Err(Error::MissingField { field, .. }) => assert_eq!(field, "properties.osProfile"),
            other => panic!("unexpected result {:?}", other),
        }
        match vm(json!({})).await {
            Err(Error::MissingField { field, .. }) => assert_eq!(field, "properties"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_virtual_machine_scale_set() {
        let body = json!({"properties": {"virtualMachineProfile": {"osProfile": {"windowsConfiguration": {}}}}});
        assert_eq!(
            resolve_virtual_machine_scale_set(&clients(VMSS, body), &ResourceId::parse(VMSS).unwrap())
                .await
                .unwrap(),
            "azurerm_windows_virtual_machine_scale_set"
        );

        let body = json!({"properties": {"virtualMachineProfile": {"osProfile": {"linuxConfiguration": {}}}}});
        assert_eq!(
            resolve_virtual_machine_scale_set(&clients(VMSS, body), &ResourceId::parse(VMSS).unwrap())
                .await
                .unwrap(),
            "azurerm_linux_virtual_machine_scale_set"
        );
    }

    #[tokio::test]
    async fn test_dev_test_virtual_machine() {
        let id = ResourceId::parse(LAB_VM).unwrap();
        assert_eq!(
            resolve_dev_test_virtual_machine(&clients(LAB_VM, json!({"properties": {"osType": "Linux"}})), &id)
                .await
                .unwrap(),
            "azurerm_dev_test_linux_virtual_machine"
        );
        assert!(matches!(
            resolve_dev_test_virtual_machine(&clients(LAB_VM, json!({"properties": {"osType": "Plan9"}})), &id).await,
            Err(Error::UnknownDiscriminator { .. })
        ));
    }
}
