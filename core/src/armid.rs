//! Azure Resource Manager resource ids.
//!
//! An id is a chain of scopes. The chain always ends (at its root) in one of the
//! root scopes: the tenant, a subscription, a resource group or a management group.
//! Everything else is a [`ScopedResourceId`]: a provider namespace followed by one or
//! more type/name pairs, rooted at exactly one parent scope. Extension resources
//! (e.g. diagnostic settings on a virtual machine) are scoped resources whose parent
//! scope is itself a scoped resource.

use std::{fmt, str::FromStr};

use crate::util::eq_fold;

const SUBSCRIPTIONS: &str = "subscriptions";
const RESOURCE_GROUPS: &str = "resourceGroups";
const PROVIDERS: &str = "providers";
const MANAGEMENT_NAMESPACE: &str = "Microsoft.Management";
const MANAGEMENT_GROUPS: &str = "managementGroups";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArmIdError {
    #[error("parsing resource id {input:?}: {reason}")]
    Parse { input: String, reason: String },
    #[error("resource id {id:?} does not match import spec {spec:?}: {reason}")]
    SpecMismatch { id: String, spec: String, reason: String },
}

fn parse_error(input: &str, reason: impl Into<String>) -> ArmIdError {
    ArmIdError::Parse {
        input:  input.to_string(),
        reason: reason.into(),
    }
}

#[derive(Debug, Clone)]
pub enum ResourceId {
    Tenant,
    Subscription {
        id: String,
    },
    ResourceGroup {
        subscription_id: String,
        name:            String,
    },
    ManagementGroup {
        name: String,
    },
    Scoped(ScopedResourceId),
}

/// A provider resource: `<parent scope>/providers/<namespace>/<type>/<name>[/<type>/<name>...]`.
///
/// `attr_types` and `attr_names` always have the same, non-zero, length.
#[derive(Debug, Clone)]
pub struct ScopedResourceId {
    parent_scope: Box<ResourceId>,
    provider:     String,
    attr_types:   Vec<String>,
    attr_names:   Vec<String>,
}

/// The resource group a scoped resource lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceGroupRef<'a> {
    pub subscription_id: &'a str,
    pub name:            &'a str,
}

impl ScopedResourceId {
    pub fn new(
        parent_scope: ResourceId,
        provider: impl Into<String>,
        pairs: impl IntoIterator<Item = (String, String)>,
    ) -> Option<Self> {
        let (attr_types, attr_names): (Vec<String>, Vec<String>) = pairs.into_iter().unzip();
        if attr_types.is_empty() {
            return None;
        }
        Some(Self {
            parent_scope: Box::new(parent_scope),
            provider: provider.into(),
            attr_types,
            attr_names,
        })
    }

    pub fn parent_scope(&self) -> &ResourceId {
        &self.parent_scope
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn attr_types(&self) -> &[String] {
        &self.attr_types
    }

    pub fn attr_names(&self) -> &[String] {
        &self.attr_names
    }

    /// Replaces the type token at `index`. Returns false when there is no such position.
    pub fn set_attr_type(&mut self, index: usize, attr_type: impl Into<String>) -> bool {
        match self.attr_types.get_mut(index) {
            Some(slot) => {
                *slot = attr_type.into();
                true
            }
            None => false,
        }
    }

    pub fn push(&mut self, attr_type: impl Into<String>, attr_name: impl Into<String>) {
        self.attr_types.push(attr_type.into());
        self.attr_names.push(attr_name.into());
    }

    fn type_string(&self) -> String {
        format!("{}/{}", self.provider, self.attr_types.join("/"))
    }
}

impl fmt::Display for ScopedResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !matches!(*self.parent_scope, ResourceId::Tenant) {
            write!(f, "{}", self.parent_scope)?;
        }
        write!(f, "/{}/{}", PROVIDERS, self.provider)?;
        for (attr_type, attr_name) in self.attr_types.iter().zip(&self.attr_names) {
            write!(f, "/{}/{}", attr_type, attr_name)?;
        }
        Ok(())
    }
}

impl ResourceId {
    pub fn parse(input: &str) -> Result<Self, ArmIdError> {
        if input == "/" {
            return Ok(ResourceId::Tenant);
        }
        let Some(body) = input.strip_prefix('/') else {
            return Err(parse_error(input, "must start with '/'"));
        };
        let segments: Vec<&str> = body.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(parse_error(input, "empty segment"));
        }

        let (mut scope, mut rest): (ResourceId, &[&str]) = match &segments[..] {
            [subs, subscription_id, rgs, name, rest @ ..] if eq_fold(subs, SUBSCRIPTIONS) && eq_fold(rgs, RESOURCE_GROUPS) => (
                ResourceId::ResourceGroup {
                    subscription_id: subscription_id.to_string(),
                    name:            name.to_string(),
                },
                rest,
            ),
            [subs, subscription_id, rest @ ..] if eq_fold(subs, SUBSCRIPTIONS) => (
                ResourceId::Subscription {
                    id: subscription_id.to_string(),
                },
                rest,
            ),
            [providers, ns, mgs, name, rest @ ..]
                if eq_fold(providers, PROVIDERS) && eq_fold(ns, MANAGEMENT_NAMESPACE) && eq_fold(mgs, MANAGEMENT_GROUPS) =>
            {
                (ResourceId::ManagementGroup { name: name.to_string() }, rest)
            }
            [providers, ..] if eq_fold(providers, PROVIDERS) => (ResourceId::Tenant, &segments[..]),
            [first, ..] => return Err(parse_error(input, format!("unknown root scope {:?}", first))),
            [] => return Err(parse_error(input, "no segments")),
        };

        while !rest.is_empty() {
            let [providers, provider, pairs @ ..] = rest else {
                return Err(parse_error(input, "expected 'providers/<namespace>'"));
            };
            if !eq_fold(providers, PROVIDERS) {
                return Err(parse_error(input, format!("expected 'providers', got {:?}", providers)));
            }

            let mut attr_types = Vec::new();
            let mut attr_names = Vec::new();
            let mut i = 0;
            while i < pairs.len() {
                // A "providers" keyword in a type position starts an extension resource.
                if i > 0 && eq_fold(pairs[i], PROVIDERS) {
                    break;
                }
                let Some(name) = pairs.get(i + 1) else {
                    return Err(parse_error(input, format!("type {:?} has no name", pairs[i])));
                };
                attr_types.push(pairs[i].to_string());
                attr_names.push(name.to_string());
                i += 2;
            }
            if attr_types.is_empty() {
                return Err(parse_error(input, format!("provider {:?} has no type/name pair", provider)));
            }

            scope = ResourceId::Scoped(ScopedResourceId {
                parent_scope: Box::new(scope),
                provider: provider.to_string(),
                attr_types,
                attr_names,
            });
            rest = &pairs[i..];
        }

        Ok(scope)
    }

    pub fn is_root_scope(&self) -> bool {
        !matches!(self, ResourceId::Scoped(_))
    }

    pub fn as_scoped(&self) -> Option<&ScopedResourceId> {
        match self {
            ResourceId::Scoped(scoped) => Some(scoped),
            _ => None,
        }
    }

    pub fn as_scoped_mut(&mut self) -> Option<&mut ScopedResourceId> {
        match self {
            ResourceId::Scoped(scoped) => Some(scoped),
            _ => None,
        }
    }

    /// The scope this resource is rooted at. Root scopes have none.
    pub fn parent_scope(&self) -> Option<&ResourceId> {
        match self {
            ResourceId::Scoped(scoped) => Some(&scoped.parent_scope),
            _ => None,
        }
    }

    /// The id with its last type/name pair removed.
    pub fn parent(&self) -> Option<ResourceId> {
        match self {
            ResourceId::Tenant => None,
            ResourceId::Subscription { .. } | ResourceId::ManagementGroup { .. } => Some(ResourceId::Tenant),
            ResourceId::ResourceGroup { subscription_id, .. } => Some(ResourceId::Subscription {
                id: subscription_id.clone(),
            }),
            ResourceId::Scoped(scoped) if scoped.attr_types.len() > 1 => {
                let mut parent = scoped.clone();
                parent.attr_types.pop();
                parent.attr_names.pop();
                Some(ResourceId::Scoped(parent))
            }
            ResourceId::Scoped(scoped) => Some((*scoped.parent_scope).clone()),
        }
    }

    pub fn root_scope(&self) -> &ResourceId {
        match self {
            ResourceId::Scoped(scoped) => scoped.parent_scope.root_scope(),
            _ => self,
        }
    }

    pub fn resource_group(&self) -> Option<ResourceGroupRef<'_>> {
        match self.root_scope() {
            ResourceId::ResourceGroup { subscription_id, name } => Some(ResourceGroupRef { subscription_id, name }),
            _ => None,
        }
    }

    /// The subscription this id lives in, if it lives in one at all.
    pub fn subscription_id(&self) -> Option<&str> {
        match self.root_scope() {
            ResourceId::Subscription { id } => Some(id),
            ResourceId::ResourceGroup { subscription_id, .. } => Some(subscription_id),
            _ => None,
        }
    }

    /// Own name components, in declaration order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            ResourceId::Tenant => Vec::new(),
            ResourceId::Subscription { id } => vec![id.as_str()],
            ResourceId::ResourceGroup { name, .. } | ResourceId::ManagementGroup { name } => vec![name.as_str()],
            ResourceId::Scoped(scoped) => scoped.attr_names.iter().map(String::as_str).collect(),
        }
    }

    /// The ARM resource type, e.g. `Microsoft.Network/networkInterfaces`.
    pub fn type_string(&self) -> String {
        match self {
            ResourceId::Scoped(scoped) => scoped.type_string(),
            root => root.root_kind().map(|kind| kind.type_string()).unwrap_or_default(),
        }
    }

    /// The shape of the scope chain without any names, e.g.
    /// `/subscriptions/resourceGroups/Microsoft.Compute/virtualMachines`.
    pub fn scope_string(&self) -> String {
        match self {
            ResourceId::Scoped(scoped) => {
                let parent = scoped.parent_scope.scope_string();
                let parent = if parent == "/" { "" } else { parent.as_str() };
                format!("{}/{}", parent, scoped.type_string())
            }
            root => root.root_kind().map(|kind| kind.scope_string()).unwrap_or_default(),
        }
    }

    /// Rewrites provider namespaces and type tokens to the exact spelling used by `import_spec`,
    /// keeping every name. The spec is a [`ScopeSpec`] string describing an id of the same shape.
    pub fn normalize(&mut self, import_spec: &str) -> Result<(), ArmIdError> {
        let spec = ScopeSpec::parse(import_spec)?;
        let mut normalized = self.clone();
        normalized
            .normalize_with(spec.root, &spec.providers)
            .map_err(|reason| ArmIdError::SpecMismatch {
                id: self.to_string(),
                spec: import_spec.to_string(),
                reason,
            })?;
        *self = normalized;
        Ok(())
    }

    fn normalize_with(&mut self, root: RootKind, providers: &[ProviderSpec]) -> Result<(), String> {
        match self {
            ResourceId::Scoped(id) => {
                let Some((spec, outer)) = providers.split_last() else {
                    return Err("the import spec has fewer provider levels than the id".to_string());
                };
                if !eq_fold(&id.provider, &spec.namespace) {
                    return Err(format!("provider {:?} differs from {:?}", id.provider, spec.namespace));
                }
                if id.attr_types.len() != spec.types.len() {
                    return Err(format!(
                        "{} type segments, the import spec has {}",
                        id.attr_types.len(),
                        spec.types.len()
                    ));
                }
                if let Some((a, b)) = id.attr_types.iter().zip(&spec.types).find(|(a, b)| !eq_fold(a, b)) {
                    return Err(format!("type {:?} differs from {:?}", a, b));
                }
                id.provider = spec.namespace.clone();
                id.attr_types = spec.types.clone();
                id.parent_scope.normalize_with(root, outer)
            }
            id => {
                if !providers.is_empty() {
                    return Err("the import spec has more provider levels than the id".to_string());
                }
                match id.root_kind() {
                    Some(kind) if kind == root => Ok(()),
                    _ => Err(format!("root scope {} differs from {}", id.scope_string(), root.scope_string())),
                }
            }
        }
    }

    pub fn root_kind(&self) -> Option<RootKind> {
        match self {
            ResourceId::Tenant => Some(RootKind::Tenant),
            ResourceId::Subscription { .. } => Some(RootKind::Subscription),
            ResourceId::ResourceGroup { .. } => Some(RootKind::ResourceGroup),
            ResourceId::ManagementGroup { .. } => Some(RootKind::ManagementGroup),
            ResourceId::Scoped(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    Tenant,
    Subscription,
    ResourceGroup,
    ManagementGroup,
}

impl RootKind {
    pub fn type_string(&self) -> String {
        match self {
            RootKind::Tenant => "Microsoft.Resources/tenants".to_string(),
            RootKind::Subscription => "Microsoft.Resources/subscriptions".to_string(),
            RootKind::ResourceGroup => "Microsoft.Resources/resourceGroups".to_string(),
            RootKind::ManagementGroup => format!("{}/{}", MANAGEMENT_NAMESPACE, MANAGEMENT_GROUPS),
        }
    }

    pub fn scope_string(&self) -> String {
        match self {
            RootKind::Tenant => "/".to_string(),
            RootKind::Subscription => format!("/{}", SUBSCRIPTIONS),
            RootKind::ResourceGroup => format!("/{}/{}", SUBSCRIPTIONS, RESOURCE_GROUPS),
            RootKind::ManagementGroup => format!("/{}/{}/{}", PROVIDERS, MANAGEMENT_NAMESPACE, MANAGEMENT_GROUPS),
        }
    }
}

/// One provider level of a [`ScopeSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    pub namespace: String,
    pub types:     Vec<String>,
}

/// The shape of a resource id with every name left out, in the same form as
/// [`ResourceId::scope_string`], e.g. `/subscriptions/resourceGroups/Microsoft.Network/virtualNetworks/subnets`.
///
/// A name is implied after every type. Provider namespaces are told apart from types by the
/// dot every namespace contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSpec {
    root:      RootKind,
    providers: Vec<ProviderSpec>,
}

impl ScopeSpec {
    pub fn parse(spec: &str) -> Result<Self, ArmIdError> {
        if spec == "/" {
            return Ok(ScopeSpec {
                root:      RootKind::Tenant,
                providers: Vec::new(),
            });
        }
        let Some(body) = spec.strip_prefix('/') else {
            return Err(parse_error(spec, "must start with '/'"));
        };
        let segments: Vec<&str> = body.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(parse_error(spec, "empty segment"));
        }

        let (root, rest): (RootKind, &[&str]) = match &segments[..] {
            [subs, rgs, rest @ ..] if eq_fold(subs, SUBSCRIPTIONS) && eq_fold(rgs, RESOURCE_GROUPS) => (RootKind::ResourceGroup, rest),
            [subs, rest @ ..] if eq_fold(subs, SUBSCRIPTIONS) => (RootKind::Subscription, rest),
            [providers, ns, mgs, rest @ ..]
                if eq_fold(providers, PROVIDERS) && eq_fold(ns, MANAGEMENT_NAMESPACE) && eq_fold(mgs, MANAGEMENT_GROUPS) =>
            {
                (RootKind::ManagementGroup, rest)
            }
            _ => (RootKind::Tenant, &segments[..]),
        };

        let mut providers: Vec<ProviderSpec> = Vec::new();
        for segment in rest {
            if segment.contains('.') {
                providers.push(ProviderSpec {
                    namespace: segment.to_string(),
                    types:     Vec::new(),
                });
            } else {
                let Some(current) = providers.last_mut() else {
                    return Err(parse_error(spec, format!("type {:?} comes before any provider namespace", segment)));
                };
                current.types.push(segment.to_string());
            }
        }
        if let Some(empty) = providers.iter().find(|p| p.types.is_empty()) {
            return Err(parse_error(spec, format!("provider {:?} has no type", empty.namespace)));
        }

        Ok(ScopeSpec { root, providers })
    }

    pub fn root(&self) -> RootKind {
        self.root
    }

    pub fn providers(&self) -> &[ProviderSpec] {
        &self.providers
    }

    /// The ARM type of the innermost level, e.g. `Microsoft.Network/virtualNetworks/subnets`.
    pub fn type_string(&self) -> String {
        match self.providers.last() {
            Some(provider) => format!("{}/{}", provider.namespace, provider.types.join("/")),
            None => self.root.type_string(),
        }
    }
}

impl FromStr for ResourceId {
    type Err = ArmIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceId::parse(s)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Tenant => write!(f, "/"),
            ResourceId::Subscription { id } => write!(f, "/{}/{}", SUBSCRIPTIONS, id),
            ResourceId::ResourceGroup { subscription_id, name } => {
                write!(f, "/{}/{}/{}/{}", SUBSCRIPTIONS, subscription_id, RESOURCE_GROUPS, name)
            }
            ResourceId::ManagementGroup { name } => {
                write!(f, "/{}/{}/{}/{}", PROVIDERS, MANAGEMENT_NAMESPACE, MANAGEMENT_GROUPS, name)
            }
            ResourceId::Scoped(scoped) => write!(f, "{}", scoped),
        }
    }
}

impl PartialEq for ScopedResourceId {
    fn eq(&self, other: &Self) -> bool {
        eq_fold(&self.provider, &other.provider)
            && self.attr_types.len() == other.attr_types.len()
            && self.attr_types.iter().zip(&other.attr_types).all(|(a, b)| eq_fold(a, b))
            && self.attr_names == other.attr_names
            && self.parent_scope == other.parent_scope
    }
}

impl PartialEq for ResourceId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ResourceId::Tenant, ResourceId::Tenant) => true,
            (ResourceId::Subscription { id: a }, ResourceId::Subscription { id: b }) => a == b,
            (
                ResourceId::ResourceGroup {
                    subscription_id: sa,
                    name: na,
                },
                ResourceId::ResourceGroup {
                    subscription_id: sb,
                    name: nb,
                },
            ) => sa == sb && na == nb,
            (ResourceId::ManagementGroup { name: a }, ResourceId::ManagementGroup { name: b }) => a == b,
            (ResourceId::Scoped(a), ResourceId::Scoped(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ResourceId {}

#[cfg(test)]
mod tests {
    use super::*;

    const VM: &str = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachines/vm1";

    #[test]
    fn test_parse_root_scopes() {
        assert_eq!(ResourceId::parse("/").unwrap(), ResourceId::Tenant);
        assert_eq!(
            ResourceId::parse("/subscriptions/sub1").unwrap(),
            ResourceId::Subscription { id: "sub1".into() }
        );
        assert_eq!(
            ResourceId::parse("/SUBSCRIPTIONS/sub1/resourcegroups/rg1").unwrap(),
            ResourceId::ResourceGroup {
                subscription_id: "sub1".into(),
                name:            "rg1".into(),
            }
        );
        assert_eq!(
            ResourceId::parse("/providers/Microsoft.Management/managementGroups/mg1").unwrap(),
            ResourceId::ManagementGroup { name: "mg1".into() }
        );
    }

    #[test]
    fn test_parse_scoped() {
        let id = ResourceId::parse(VM).unwrap();
        let scoped = id.as_scoped().unwrap();
        assert_eq!(scoped.provider(), "Microsoft.Compute");
        assert_eq!(scoped.attr_types(), ["virtualMachines"]);
        assert_eq!(id.names(), vec!["vm1"]);
        assert_eq!(id.type_string(), "Microsoft.Compute/virtualMachines");
        assert_eq!(id.scope_string(), "/subscriptions/resourceGroups/Microsoft.Compute/virtualMachines");
        assert_eq!(id.to_string(), VM);
    }

    #[test]
    fn test_parse_extension_resource() {
        let input = format!("{}/providers/Microsoft.Insights/diagnosticSettings/setting1", VM);
        let id = ResourceId::parse(&input).unwrap();
        assert_eq!(id.names(), vec!["setting1"]);
        assert_eq!(id.parent_scope().unwrap().to_string(), VM);
        assert_eq!(
            id.root_scope(),
            &ResourceId::ResourceGroup {
                subscription_id: "sub1".into(),
                name:            "rg1".into(),
            }
        );
        assert_eq!(id.to_string(), input);
    }

    #[test]
    fn test_parse_tenant_level_resource() {
        let id = ResourceId::parse("/providers/Microsoft.Billing/billingAccounts/ba1").unwrap();
        assert_eq!(id.parent_scope(), Some(&ResourceId::Tenant));
        assert_eq!(id.scope_string(), "/Microsoft.Billing/billingAccounts");
        assert_eq!(id.to_string(), "/providers/Microsoft.Billing/billingAccounts/ba1");
    }

    #[test]
    fn test_parse_errors() {
        for input in [
            "",
            "subscriptions/sub1",
            "/subscriptions/",
            "/subscriptions//resourceGroups/rg1",
            "/foo/bar",
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Compute",
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachines",
            "/subscriptions/sub1/resourceGroups/rg1/things/x",
        ] {
            assert!(
                matches!(ResourceId::parse(input), Err(ArmIdError::Parse { .. })),
                "{:?} should not parse",
                input
            );
        }
    }

    #[test]
    fn test_parent() {
        let id = ResourceId::parse(
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Storage/storageAccounts/acct/queueServices/default/queues/q1",
        )
        .unwrap();
        let parent = id.parent().unwrap();
        assert_eq!(
            parent.to_string(),
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Storage/storageAccounts/acct/queueServices/default"
        );

        let vm = ResourceId::parse(VM).unwrap();
        assert_eq!(vm.parent().unwrap().to_string(), "/subscriptions/sub1/resourceGroups/rg1");
        assert_eq!(
            vm.parent().unwrap().parent().unwrap(),
            ResourceId::Subscription { id: "sub1".into() }
        );
        assert_eq!(ResourceId::Tenant.parent(), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let id = ResourceId::parse(VM).unwrap();
        let mut copy = id.clone();
        copy.as_scoped_mut().unwrap().push("extensions", "ext1");
        assert_eq!(id.to_string(), VM);
        assert_eq!(copy.to_string(), format!("{}/extensions/ext1", VM));
    }

    #[test]
    fn test_normalize_copies_spec_casing() {
        const SUBNET_SPEC: &str = "/subscriptions/resourceGroups/Microsoft.Network/virtualNetworks/subnets";
        let mut id = ResourceId::parse(
            "/subscriptions/sub1/resourcegroups/rg1/providers/microsoft.network/VIRTUALNETWORKS/vnet1/subnets/Sub1",
        )
        .unwrap();
        id.normalize(SUBNET_SPEC).unwrap();
        assert_eq!(
            id.to_string(),
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Network/virtualNetworks/vnet1/subnets/Sub1"
        );

        let once = id.to_string();
        id.normalize(SUBNET_SPEC).unwrap();
        assert_eq!(id.to_string(), once);
    }

    #[test]
    fn test_normalize_extension_resource() {
        let mut id = ResourceId::parse(&format!(
            "{}/providers/microsoft.insights/DIAGNOSTICSETTINGS/setting1",
            VM.to_lowercase()
        ))
        .unwrap();
        id.normalize("/subscriptions/resourceGroups/Microsoft.Compute/virtualMachines/Microsoft.Insights/diagnosticSettings")
            .unwrap();
        assert_eq!(
            id.to_string(),
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachines/vm1/providers/Microsoft.Insights/diagnosticSettings/setting1"
        );
    }

    #[test]
    fn test_normalize_shape_mismatch() {
        let mut id = ResourceId::parse(VM).unwrap();
        let err = id
            .normalize("/subscriptions/resourceGroups/Microsoft.Network/virtualNetworks/subnets")
            .unwrap_err();
        assert!(matches!(err, ArmIdError::SpecMismatch { .. }));

        let err = id.normalize("/subscriptions/Microsoft.Compute/virtualMachines").unwrap_err();
        assert!(matches!(err, ArmIdError::SpecMismatch { .. }));

        // A failed normalization leaves the id untouched.
        assert_eq!(id.to_string(), VM);
    }

    #[test]
    fn test_scope_spec_parse() {
        let spec = ScopeSpec::parse("/subscriptions/resourceGroups/Microsoft.Web/sites/slots/config").unwrap();
        assert_eq!(spec.root(), RootKind::ResourceGroup);
        assert_eq!(spec.type_string(), "Microsoft.Web/sites/slots/config");

        let spec = ScopeSpec::parse("/providers/Microsoft.Management/managementGroups").unwrap();
        assert_eq!(spec.root(), RootKind::ManagementGroup);
        assert!(spec.providers().is_empty());
        assert_eq!(spec.type_string(), "Microsoft.Management/managementGroups");

        let spec = ScopeSpec::parse("/Microsoft.Authorization/policyDefinitions").unwrap();
        assert_eq!(spec.root(), RootKind::Tenant);
        assert_eq!(spec.providers()[0].namespace, "Microsoft.Authorization");

        assert!(ScopeSpec::parse("/subscriptions/virtualMachines").is_err());
        assert!(ScopeSpec::parse("/subscriptions/resourceGroups/Microsoft.Compute").is_err());
        assert!(ScopeSpec::parse("subscriptions").is_err());
    }

    #[test]
    fn test_scope_string_round_trips_through_spec() {
        let id = ResourceId::parse(VM).unwrap();
        let spec = ScopeSpec::parse(&id.scope_string()).unwrap();
        assert_eq!(spec.type_string(), id.type_string());
        assert_eq!(ResourceId::Tenant.scope_string(), "/");
        assert_eq!(
            ResourceId::ManagementGroup { name: "mg".into() }.scope_string(),
            "/providers/Microsoft.Management/managementGroups"
        );
    }

    #[test]
    fn test_equality_ignores_keyword_case_only() {
        let a = ResourceId::parse(VM).unwrap();
        let b = ResourceId::parse("/subscriptions/sub1/resourceGroups/rg1/providers/MICROSOFT.COMPUTE/virtualmachines/vm1").unwrap();
        let c = ResourceId::parse("/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Compute/virtualMachines/VM1").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_resource_group_ref() {
        let id = ResourceId::parse(VM).unwrap();
        assert_eq!(
            id.resource_group(),
            Some(ResourceGroupRef {
                subscription_id: "sub1",
                name:            "rg1",
            })
        );
        assert_eq!(id.subscription_id(), Some("sub1"));
        assert_eq!(ResourceId::parse("/subscriptions/sub1").unwrap().resource_group(), None);
    }
}
