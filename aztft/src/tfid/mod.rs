//! Building the Terraform import id of an ARM id for a given azurerm resource type.

use aztft_core::{armid::ResourceId, util::eq_fold};

use crate::{
    catalog::{Catalog, StaticRule},
    client::ClientBuilder,
    error::{Error, Result},
    util::name_at,
};

mod build_association;
mod build_key_vault;
mod build_storage;
pub mod dynamic;

pub use dynamic::DynamicBuilder;

/// The import spec `id` is built against when imported as `resource_type`.
/// An empty spec means the type has none and its id is built dynamically.
pub fn get_import_spec<'c>(catalog: &'c Catalog, id: &ResourceId, resource_type: &str) -> Result<&'c str> {
    let entry = catalog
        .lookup(resource_type)
        .ok_or_else(|| Error::UnknownResourceType(resource_type.to_string()))?;

    let scope_mismatch = || Error::ScopeMismatch {
        id:            id.to_string(),
        resource_type: resource_type.to_string(),
    };

    // A root scope resource has exactly one import spec.
    let Some(parent_scope) = id.parent_scope() else {
        return entry.import_specs.first().map(String::as_str).ok_or_else(scope_mismatch);
    };

    match entry.import_specs.as_slice() {
        [] => Ok(""),
        [spec] => Ok(spec),
        specs => {
            let scope = parent_scope.scope_string();
            entry
                .parent_scopes
                .iter()
                .position(|parent| eq_fold(parent, &scope))
                .and_then(|i| specs.get(i))
                .map(String::as_str)
                .ok_or_else(scope_mismatch)
        }
    }
}

fn normalize(id: &mut ResourceId, resource_type: &str, spec: &str) -> Result<()> {
    let original = id.to_string();
    id.normalize(spec).map_err(|source| Error::Normalize {
        id: original,
        resource_type: resource_type.to_string(),
        spec: spec.to_string(),
        source,
    })
}

fn normalized_parent(id: &ResourceId, resource_type: &str, spec: &str) -> Result<String> {
    let mut parent = id.parent().ok_or_else(|| Error::UnexpectedShape {
        id:     id.to_string(),
        reason: "has no parent".to_string(),
    })?;
    normalize(&mut parent, resource_type, spec)?;
    Ok(parent.to_string())
}

/// Builds the import id without calling any API.
pub fn static_build(catalog: &Catalog, id: &ResourceId, resource_type: &str) -> Result<String> {
    let mut id = id.clone();
    let spec = get_import_spec(catalog, &id, resource_type)?;

    if id.is_root_scope() {
        return Ok(id.to_string());
    }

    let rule = catalog.lookup(resource_type).and_then(|entry| entry.static_rule.as_ref());
    match rule {
        Some(StaticRule::ReplaceAttrType { index, literal }) => {
            let replaced = id.as_scoped_mut().is_some_and(|scoped| scoped.set_attr_type(*index, literal.as_str()));
            if !replaced {
                return Err(Error::UnexpectedShape {
                    id:     id.to_string(),
                    reason: format!("no type at position {}", index),
                });
            }
        }
        Some(StaticRule::ParentScopeWithName { name_index }) => {
            let name = name_at(&id, *name_index)?;
            let parent_scope = id.parent_scope().map(ResourceId::to_string).unwrap_or_default();
            return Ok(format!("{}|{}", parent_scope, name));
        }
        Some(StaticRule::NormalizedParentWithName { name_index }) => {
            let name = name_at(&id, *name_index)?;
            return Ok(format!("{}|{}", normalized_parent(&id, resource_type, spec)?, name));
        }
        Some(StaticRule::NormalizedParent) => return normalized_parent(&id, resource_type, spec),
        None => {}
    }

    if !spec.is_empty() {
        normalize(&mut id, resource_type, spec)?;
    }
    Ok(id.to_string())
}

/// Whether building the import id of `resource_type` needs live state.
pub fn needs_api(resource_type: &str) -> bool {
    dynamic::builder_for(resource_type).is_some()
}

/// Builds the import id from live state.
pub async fn dynamic_build(
    catalog: &Catalog,
    clients: &ClientBuilder,
    id: &ResourceId,
    resource_type: &str,
) -> Result<String> {
    let id = id.clone();
    let spec = get_import_spec(catalog, &id, resource_type)?;

    let builder =
        dynamic::builder_for(resource_type).ok_or_else(|| Error::NoDynamicBuilder(resource_type.to_string()))?;
    tracing::debug!("Building {} as {} with {:?}", id, resource_type, builder);

    builder.build(clients, &id, resource_type, spec).await
}
