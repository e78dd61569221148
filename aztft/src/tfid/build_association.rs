use aztft_core::{armid::ResourceId, util::eq_fold};

use super::{dynamic::NicAssociation, normalize};
use crate::{
    client::{
        ClientBuilder,
        models::{
            SubResource,
            network::{IpConfigurationProperties, NetworkInterfaceProperties},
        },
    },
    error::{Error, Result},
    util::{ancestor, client_for, name_at, parse_reference},
};

fn ends_with_names(id: &ResourceId, wanted: &[&str]) -> bool {
    let names = id.names();
    names.len() >= wanted.len() && names[names.len() - wanted.len()..].iter().zip(wanted).all(|(a, b)| eq_fold(a, b))
}

/// The first reference whose trailing names are `wanted`.
fn find_reference<'r>(
    id: &ResourceId,
    references: impl IntoIterator<Item = &'r str>,
    wanted: &[&str],
    target: &str,
) -> Result<ResourceId> {
    for reference in references {
        let referenced = parse_reference(reference)?;
        if ends_with_names(&referenced, wanted) {
            return Ok(referenced);
        }
    }
    Err(Error::AssociationNotFound {
        id:     id.to_string(),
        target: target.to_string(),
    })
}

fn ids(references: &[SubResource]) -> impl Iterator<Item = &str> {
    references.iter().filter_map(|r| r.id.as_deref())
}

/// The properties of the ip configuration named by the second name of `id`.
fn ip_config_properties<'p>(id: &ResourceId, props: &'p NetworkInterfaceProperties) -> Result<&'p IpConfigurationProperties> {
    let ip_config_name = name_at(id, 1)?;
    let ip_config = props
        .ip_configurations
        .iter()
        .find(|c| c.name.as_deref().is_some_and(|n| eq_fold(n, ip_config_name)))
        .ok_or_else(|| Error::AssociationNotFound {
            id:     id.to_string(),
            target: format!("ip configuration {:?}", ip_config_name),
        })?;
    ip_config
        .properties
        .as_ref()
        .ok_or_else(|| Error::missing(id, "properties.ipConfigurations[].properties"))
}

/// Association ids hang the associated resource off the network interface (or one of its ip
/// configurations), e.g. `<nic>/ipConfigurations/<ipconfig>/loadBalancers/<lb>/backendAddressPools/<pool>`.
/// The import id is `<owner>|<associated resource>`.
pub(super) async fn build_network_interface_association(
    clients: &ClientBuilder,
    id: &ResourceId,
    association: NicAssociation,
) -> Result<String> {
    let (client, resource_group) = client_for(clients, id).await?;
    let nic = client
        .get_network_interface(resource_group.name, name_at(id, 0)?)
        .await
        .map_err(Error::retrieval(id))?;
    let props = nic.properties.ok_or_else(|| Error::missing(id, "properties"))?;

    let (associated, owner) = match association {
        NicAssociation::SecurityGroup => (
            find_reference(
                id,
                props.network_security_group.as_ref().and_then(|r| r.id.as_deref()),
                &[name_at(id, 1)?],
                "network security group",
            )?,
            ancestor(id, 1)?,
        ),
        NicAssociation::ApplicationGatewayBackendAddressPool => (
            find_reference(
                id,
                ids(&ip_config_properties(id, &props)?.application_gateway_backend_address_pools),
                &[name_at(id, 2)?],
                "application gateway backend address pool",
            )?,
            ancestor(id, 1)?,
        ),
        NicAssociation::ApplicationSecurityGroup => (
            find_reference(
                id,
                ids(&ip_config_properties(id, &props)?.application_security_groups),
                &[name_at(id, 2)?],
                "application security group",
            )?,
            ancestor(id, 2)?,
        ),
        NicAssociation::LoadBalancerBackendAddressPool => (
            find_reference(
                id,
                ids(&ip_config_properties(id, &props)?.load_balancer_backend_address_pools),
                &[name_at(id, 2)?, name_at(id, 3)?],
                "load balancer backend address pool",
            )?,
            ancestor(id, 2)?,
        ),
        NicAssociation::LoadBalancerNatRule => (
            find_reference(
                id,
                ids(&ip_config_properties(id, &props)?.load_balancer_inbound_nat_rules),
                &[name_at(id, 2)?, name_at(id, 3)?],
                "load balancer inbound nat rule",
            )?,
            ancestor(id, 2)?,
        ),
    };

    Ok(format!("{}|{}", owner, associated))
}

/// `<workspace>|<application group>`
pub(super) async fn build_desktop_workspace_application_group(clients: &ClientBuilder, id: &ResourceId) -> Result<String> {
    let (client, resource_group) = client_for(clients, id).await?;
    let workspace = client
        .get_desktop_workspace(resource_group.name, name_at(id, 0)?)
        .await
        .map_err(Error::retrieval(id))?;
    let props = workspace.properties.ok_or_else(|| Error::missing(id, "properties"))?;

    let application_group = find_reference(
        id,
        props.application_group_references.iter().map(String::as_str),
        &[name_at(id, 1)?],
        "application group",
    )?;
    Ok(format!("{}|{}", ancestor(id, 1)?, application_group))
}

/// `<domain service>/initialReplicaSetId/<id of the first replica set>`
pub(super) async fn build_active_directory_domain_service(
    clients: &ClientBuilder,
    id: &ResourceId,
    resource_type: &str,
    spec: &str,
) -> Result<String> {
    let (client, resource_group) = client_for(clients, id).await?;
    let service = client
        .get_domain_service(resource_group.name, name_at(id, 0)?)
        .await
        .map_err(Error::retrieval(id))?;
    let props = service.properties.ok_or_else(|| Error::missing(id, "properties"))?;
    let replica_set_id = props
        .replica_sets
        .first()
        .and_then(|r| r.replica_set_id.clone())
        .ok_or_else(|| Error::missing(id, "properties.replicaSets[0].replicaSetId"))?;

    let mut id = id.clone();
    if !spec.is_empty() {
        normalize(&mut id, resource_type, spec)?;
    }
    Ok(format!("{}/initialReplicaSetId/{}", id, replica_set_id))
}
