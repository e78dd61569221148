use serde::Deserialize;

use super::SubResource;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    pub id:         Option<String>,
    pub properties: Option<NetworkInterfaceProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceProperties {
    pub network_security_group: Option<SubResource>,
    #[serde(default)]
    pub ip_configurations:      Vec<IpConfiguration>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpConfiguration {
    pub id:         Option<String>,
    pub name:       Option<String>,
    pub properties: Option<IpConfigurationProperties>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpConfigurationProperties {
    #[serde(default)]
    pub application_gateway_backend_address_pools: Vec<SubResource>,
    #[serde(default)]
    pub application_security_groups:               Vec<SubResource>,
    #[serde(default)]
    pub load_balancer_backend_address_pools:       Vec<SubResource>,
    #[serde(default)]
    pub load_balancer_inbound_nat_rules:           Vec<SubResource>,
}
