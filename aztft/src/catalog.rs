//! The azurerm resource catalog: for every Terraform resource type, the shape(s) of its import id.

use std::path::Path;

use aztft_core::{
    armid::{ResourceId, ScopeSpec},
    util::{RON, eq_fold},
};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.ron");

lazy_static! {
    static ref BUILTIN: Catalog = Catalog::from_ron_str(BUILTIN_CATALOG).expect("the embedded catalog is valid");
}

/// A rewrite applied before (or instead of) plain import spec normalization, for the handful
/// of types whose import id differs structurally from their ARM id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum StaticRule {
    /// Overwrite the type token at `index` with `literal`, then normalize.
    ReplaceAttrType { index: usize, literal: String },
    /// `<parent scope>|<names[name_index]>`
    ParentScopeWithName { name_index: usize },
    /// `<parent normalized against the import spec>|<names[name_index]>`
    NormalizedParentWithName { name_index: usize },
    /// The parent normalized against the import spec; the resource's own segment is dropped.
    NormalizedParent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogEntry {
    pub import_specs:  Vec<String>,
    /// Parallel to `import_specs` when there is more than one.
    pub parent_scopes: Vec<String>,
    pub removed:       bool,
    /// Shapes of the ARM ids that map onto this type. Empty means "same as `import_specs`".
    /// A leading `*` stands for any parent scope.
    pub arm_scopes:    Vec<String>,
    pub static_rule:   Option<StaticRule>,
}

impl CatalogEntry {
    pub fn arm_scopes(&self) -> &[String] {
        if self.arm_scopes.is_empty() {
            &self.import_specs
        } else {
            &self.arm_scopes
        }
    }

    fn matches_scope(&self, scope: &str) -> bool {
        self.arm_scopes().iter().any(|pattern| match pattern.strip_prefix('*') {
            Some(suffix) => {
                scope.len() > suffix.len()
                    && scope.is_char_boundary(scope.len() - suffix.len())
                    && eq_fold(&scope[scope.len() - suffix.len()..], suffix)
            }
            None => eq_fold(pattern, scope),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl Catalog {
    /// The catalog compiled into aztft, parsed on first use.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn from_ron_str(s: &str) -> Result<Catalog> {
        let entries: IndexMap<String, CatalogEntry> = RON.from_str(s).map_err(|e| Error::Catalog(e.to_string()))?;
        let catalog = Catalog { entries };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Catalog> {
        tracing::info!("Loading resource catalog at {:?}", path);
        let s = std::fs::read_to_string(path).map_err(|e| Error::Catalog(format!("reading {:?}: {}", path, e)))?;
        Catalog::from_ron_str(&s)
    }

    fn validate(&self) -> Result<()> {
        for (resource_type, entry) in &self.entries {
            if entry.import_specs.len() > 1 && entry.import_specs.len() != entry.parent_scopes.len() {
                return Err(Error::Catalog(format!(
                    "{}: {} import specs but {} parent scopes",
                    resource_type,
                    entry.import_specs.len(),
                    entry.parent_scopes.len()
                )));
            }

            let scopes = entry
                .import_specs
                .iter()
                .chain(&entry.parent_scopes)
                .map(String::as_str)
                .chain(entry.arm_scopes.iter().map(|s| s.strip_prefix('*').unwrap_or(s)));
            for scope in scopes {
                ScopeSpec::parse(scope).map_err(|e| Error::Catalog(format!("{}: {}", resource_type, e)))?;
            }
        }
        Ok(())
    }

    pub fn lookup(&self, resource_type: &str) -> Option<&CatalogEntry> {
        self.entries.get(resource_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_types(&self) -> impl Iterator<Item = (&str, &CatalogEntry)> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.removed)
            .map(|(resource_type, entry)| (resource_type.as_str(), entry))
    }

    /// Every non-removed type an ARM id of this shape can be imported as, in catalog order.
    pub fn candidate_types(&self, id: &ResourceId) -> Vec<&str> {
        let scope = id.scope_string();
        let candidates: Vec<&str> = self
            .active_types()
            .filter(|(_, entry)| entry.matches_scope(&scope))
            .map(|(resource_type, _)| resource_type)
            .collect();
        tracing::debug!("{} candidate types for {}: {:?}", candidates.len(), scope, candidates);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ResourceId {
        ResourceId::parse(s).unwrap()
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin();
        assert!(!catalog.is_empty());
        assert!(catalog.lookup("azurerm_resource_group").is_some());
        assert!(catalog.lookup("azurerm_virtual_machine").unwrap().removed);
    }

    #[test]
    fn test_candidate_types() {
        let catalog = Catalog::builtin();

        let vm = id("/subscriptions/s1/resourceGroups/rg1/providers/microsoft.compute/virtualmachines/vm1");
        assert_eq!(
            catalog.candidate_types(&vm),
            vec!["azurerm_linux_virtual_machine", "azurerm_windows_virtual_machine"]
        );

        let rg = id("/subscriptions/s1/resourceGroups/rg1");
        assert_eq!(catalog.candidate_types(&rg), vec!["azurerm_resource_group"]);

        let setting = id(
            "/subscriptions/s1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachines/vm1/providers/Microsoft.Insights/diagnosticSettings/d1",
        );
        assert_eq!(catalog.candidate_types(&setting), vec!["azurerm_monitor_diagnostic_setting"]);

        let unknown = id("/subscriptions/s1/resourceGroups/rg1/providers/Contoso.Widgets/widgets/w1");
        assert!(catalog.candidate_types(&unknown).is_empty());
    }

    #[test]
    fn test_wildcard_needs_a_parent() {
        let catalog = Catalog::builtin();
        let tenant_level = id("/providers/Microsoft.Insights/diagnosticSettings/d1");
        assert!(!catalog.candidate_types(&tenant_level).contains(&"azurerm_monitor_diagnostic_setting"));
    }

    #[test]
    fn test_from_ron_str() {
        let catalog = Catalog::from_ron_str(
            r#"{
                "azurerm_subnet": (
                    import_specs: ["/subscriptions/resourceGroups/Microsoft.Network/virtualNetworks/subnets"],
                ),
                "azurerm_storage_queue": (
                    arm_scopes: ["/subscriptions/resourceGroups/Microsoft.Storage/storageAccounts/queueServices/queues"],
                ),
                "azurerm_monitor_diagnostic_setting": (
                    arm_scopes: ["*/Microsoft.Insights/diagnosticSettings"],
                    static_rule: ParentScopeWithName(name_index: 0),
                ),
            }"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(
            catalog.active_types().map(|(t, _)| t).collect::<Vec<_>>(),
            vec!["azurerm_subnet", "azurerm_storage_queue", "azurerm_monitor_diagnostic_setting"]
        );
        assert_eq!(
            catalog.lookup("azurerm_monitor_diagnostic_setting").unwrap().static_rule,
            Some(StaticRule::ParentScopeWithName { name_index: 0 })
        );
    }

    #[test]
    fn test_validation() {
        let unbalanced = Catalog::from_ron_str(
            r#"{
                "azurerm_management_lock": (
                    import_specs: [
                        "/subscriptions/Microsoft.Authorization/locks",
                        "/subscriptions/resourceGroups/Microsoft.Authorization/locks",
                    ],
                    parent_scopes: ["/subscriptions"],
                ),
            }"#,
        );
        assert!(matches!(unbalanced, Err(Error::Catalog(_))));

        let bad_spec = Catalog::from_ron_str(r#"{ "azurerm_thing": (import_specs: ["/subscriptions/things"]) }"#);
        assert!(matches!(bad_spec, Err(Error::Catalog(_))));

        assert!(Catalog::from_ron_str("not ron").is_err());
    }

    #[test]
    fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.ron");
        std::fs::write(
            &path,
            r#"{ "azurerm_resource_group": (import_specs: ["/subscriptions/resourceGroups"]) }"#,
        )
        .unwrap();
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);

        assert!(Catalog::load(&dir.path().join("missing.ron")).is_err());
    }
}
