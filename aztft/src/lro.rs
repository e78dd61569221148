//! Permissions needed to import long running operation resources: the `write` action of their
//! ARM type and the matching `operationStatuses/read`.

use std::collections::BTreeSet;

use aztft_core::armid::ScopeSpec;

use crate::{
    catalog::Catalog,
    error::{Error, Result},
};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LroAction {
    pub write:  String,
    pub status: String,
}

/// One type per line; blank lines and `#` comments are skipped.
pub fn parse_type_list(s: &str) -> Vec<&str> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// The actions of the ARM types behind `types`, deduplicated and sorted. Types that are unknown,
/// removed, or have no import spec contribute nothing.
pub fn write_actions<'a>(catalog: &Catalog, types: impl IntoIterator<Item = &'a str>) -> Result<Vec<LroAction>> {
    let mut arm_types = BTreeSet::new();
    for resource_type in types {
        let Some(spec) = catalog
            .lookup(resource_type)
            .filter(|entry| !entry.removed)
            .and_then(|entry| entry.import_specs.first())
        else {
            tracing::debug!("Skipping {}: not an active type with an import spec", resource_type);
            continue;
        };
        let spec = ScopeSpec::parse(spec).map_err(|e| Error::Catalog(format!("{}: {}", resource_type, e)))?;
        arm_types.insert(spec.type_string());
    }

    Ok(arm_types
        .into_iter()
        .map(|arm_type| LroAction {
            write:  format!("{}/write", arm_type),
            status: format!("{}/operationStatuses/read", arm_type),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_list() {
        let list = "# storage\nazurerm_storage_account\n\n  azurerm_subnet  \n";
        assert_eq!(parse_type_list(list), vec!["azurerm_storage_account", "azurerm_subnet"]);
    }

    #[test]
    fn test_write_actions() {
        let actions = write_actions(
            Catalog::builtin(),
            [
                "azurerm_subnet",
                "azurerm_storage_account",
                "azurerm_subnet",
                "azurerm_virtual_machine",
                "azurerm_storage_queue",
                "azurerm_nope",
            ],
        )
        .unwrap();

        assert_eq!(
            actions,
            vec![
                LroAction {
                    write:  "Microsoft.Network/virtualNetworks/subnets/write".to_string(),
                    status: "Microsoft.Network/virtualNetworks/subnets/operationStatuses/read".to_string(),
                },
                LroAction {
                    write:  "Microsoft.Storage/storageAccounts/write".to_string(),
                    status: "Microsoft.Storage/storageAccounts/operationStatuses/read".to_string(),
                },
            ]
        );
    }
}
