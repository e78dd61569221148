use aztft_core::armid::ResourceId;

use crate::{
    client::{
        ClientBuilder,
        models::{SubResource, network::IpConfiguration},
    },
    error::{Error, Result},
    util::{client_for, name_at, parse_reference},
};

/// `base` extended with the given type/name pairs.
fn extend(base: &ResourceId, pairs: &[(&str, &str)]) -> Result<ResourceId> {
    let mut id = base.clone();
    let scoped = id.as_scoped_mut().ok_or_else(|| Error::UnexpectedShape {
        id:     base.to_string(),
        reason: "not a scoped resource".to_string(),
    })?;
    for (attr_type, attr_name) in pairs {
        scoped.push(*attr_type, *attr_name);
    }
    Ok(id)
}

/// Appends one derived id per non-nil reference. `segments` maps the referenced id to the
/// type/name pairs to append.
fn extend_for_each(
    base: &ResourceId,
    references: &[SubResource],
    segments: impl Fn(&ResourceId) -> Result<Vec<(&'static str, String)>>,
    out: &mut Vec<ResourceId>,
) -> Result<()> {
    for reference in references.iter().filter_map(|r| r.id.as_deref()) {
        let referenced = parse_reference(reference)?;
        let pairs = segments(&referenced)?;
        let pairs: Vec<(&str, &str)> = pairs.iter().map(|(t, n)| (*t, n.as_str())).collect();
        out.push(extend(base, &pairs)?);
    }
    Ok(())
}

fn ip_config_associations(ip_config: &IpConfiguration, out: &mut Vec<ResourceId>) -> Result<()> {
    let (Some(ip_config_id), Some(props)) = (ip_config.id.as_deref(), ip_config.properties.as_ref()) else {
        return Ok(());
    };
    let ip_config_id = parse_reference(ip_config_id)?;

    // Application gateway pools: [gateway, pool]
    extend_for_each(
        &ip_config_id,
        &props.application_gateway_backend_address_pools,
        |pool| Ok(vec![("backendAddressPools", name_at(pool, 1)?.to_string())]),
        out,
    )?;
    extend_for_each(
        &ip_config_id,
        &props.application_security_groups,
        |asg| Ok(vec![("applicationSecurityGroups", name_at(asg, 0)?.to_string())]),
        out,
    )?;
    // Load balancer children: [load balancer, child]
    extend_for_each(
        &ip_config_id,
        &props.load_balancer_backend_address_pools,
        |pool| {
            Ok(vec![
                ("loadBalancers", name_at(pool, 0)?.to_string()),
                ("backendAddressPools", name_at(pool, 1)?.to_string()),
            ])
        },
        out,
    )?;
    extend_for_each(
        &ip_config_id,
        &props.load_balancer_inbound_nat_rules,
        |rule| {
            Ok(vec![
                ("loadBalancers", name_at(rule, 0)?.to_string()),
                ("inboundNatRules", name_at(rule, 1)?.to_string()),
            ])
        },
        out,
    )?;
    Ok(())
}

pub(super) async fn populate_network_interface(clients: &ClientBuilder, id: &ResourceId) -> Result<Vec<ResourceId>> {
    let (client, resource_group) = client_for(clients, id).await?;
    let nic = client
        .get_network_interface(resource_group.name, name_at(id, 0)?)
        .await
        .map_err(Error::retrieval(id))?;
    let Some(props) = nic.properties else {
        return Ok(Vec::new());
    };

    let mut associations = Vec::new();
    if let Some(nsg) = props.network_security_group.as_ref().and_then(|r| r.id.as_deref()) {
        let nsg = parse_reference(nsg)?;
        associations.push(extend(id, &[("networkSecurityGroups", name_at(&nsg, 0)?)])?);
    }
    for ip_config in &props.ip_configurations {
        ip_config_associations(ip_config, &mut associations)?;
    }
    Ok(associations)
}
