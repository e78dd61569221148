use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachine {
    pub id:         Option<String>,
    pub properties: Option<VirtualMachineProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineProperties {
    pub os_profile: Option<OsProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsProfile {
    pub computer_name:         Option<String>,
    pub linux_configuration:   Option<LinuxConfiguration>,
    pub windows_configuration: Option<WindowsConfiguration>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinuxConfiguration {
    pub disable_password_authentication: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowsConfiguration {
    pub provision_vm_agent:       Option<bool>,
    pub enable_automatic_updates: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineScaleSet {
    pub id:         Option<String>,
    pub properties: Option<VirtualMachineScaleSetProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineScaleSetProperties {
    pub virtual_machine_profile: Option<VirtualMachineScaleSetVmProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineScaleSetVmProfile {
    pub os_profile: Option<OsProfile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevTestVirtualMachine {
    pub id:         Option<String>,
    pub properties: Option<DevTestVirtualMachineProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevTestVirtualMachineProperties {
    /// `Linux` or `Windows`.
    pub os_type: Option<String>,
}
