use std::sync::Arc;

use aztft_core::armid::{ResourceGroupRef, ResourceId, ScopedResourceId};

use crate::{
    client::{ArmClient, ClientBuilder},
    error::{Error, Result},
};

/// The resource group `id` lives in. Everything aztft looks up live is resource group scoped.
pub fn resource_group(id: &ResourceId) -> Result<ResourceGroupRef<'_>> {
    id.resource_group().ok_or_else(|| Error::UnexpectedShape {
        id:     id.to_string(),
        reason: "not scoped under a resource group".to_string(),
    })
}

pub fn name_at(id: &ResourceId, index: usize) -> Result<&str> {
    id.names().get(index).copied().ok_or_else(|| Error::UnexpectedShape {
        id:     id.to_string(),
        reason: format!("no name at position {}", index),
    })
}

/// Parses an id found in live state; a malformed one is a parse error tagged with the string.
pub fn parse_reference(reference: &str) -> Result<ResourceId> {
    Ok(ResourceId::parse(reference)?)
}

/// The ARM client for the subscription of `id`, together with its resource group.
pub async fn client_for<'a>(
    clients: &ClientBuilder,
    id: &'a ResourceId,
) -> Result<(Arc<ArmClient>, ResourceGroupRef<'a>)> {
    let resource_group = resource_group(id)?;
    let client = clients.get_or_init_client(resource_group.subscription_id).await;
    Ok((client, resource_group))
}

/// `/subscriptions/<sub>/resourceGroups/<rg>/providers/<provider>/<type>/<name>`
pub fn resource_group_resource(resource_group: ResourceGroupRef<'_>, provider: &str, attr_type: &str, name: &str) -> ResourceId {
    let parent = ResourceId::ResourceGroup {
        subscription_id: resource_group.subscription_id.to_string(),
        name:            resource_group.name.to_string(),
    };
    match ScopedResourceId::new(parent.clone(), provider, [(attr_type.to_string(), name.to_string())]) {
        Some(scoped) => ResourceId::Scoped(scoped),
        None => parent,
    }
}

/// The id with its last `n` type/name pairs removed.
pub fn ancestor(id: &ResourceId, n: usize) -> Result<ResourceId> {
    let mut current = id.clone();
    for _ in 0..n {
        current = current.parent().ok_or_else(|| Error::UnexpectedShape {
            id:     id.to_string(),
            reason: format!("fewer than {} levels", n),
        })?;
    }
    Ok(current)
}
