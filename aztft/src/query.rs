//! The top level questions aztft answers: which azurerm type(s) an ARM id is, and what its import
//! id looks like.

use aztft_core::{armid::ResourceId, config::AzureConfig};

use crate::{
    catalog::Catalog,
    client::ClientBuilder,
    error::{Error, Result},
    populate, resolve, tfid,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub resource_type: String,
    pub import_id:     String,
}

pub struct Aztft<'c> {
    catalog: &'c Catalog,
    clients: Option<ClientBuilder>,
}

impl Default for Aztft<'static> {
    fn default() -> Self {
        Aztft::new()
    }
}

impl Aztft<'static> {
    /// Queries against the built-in catalog, without API access until [`Aztft::with_clients`].
    pub fn new() -> Self {
        Aztft::with_catalog(Catalog::builtin())
    }
}

impl<'c> Aztft<'c> {
    pub fn with_catalog(catalog: &'c Catalog) -> Self {
        Aztft { catalog, clients: None }
    }

    pub fn with_clients(mut self, clients: ClientBuilder) -> Self {
        self.clients = Some(clients);
        self
    }

    /// Enables API access with clients talking to Azure as configured.
    pub fn with_config(self, config: &AzureConfig) -> Result<Self> {
        config.validate().map_err(|e| Error::Config(format!("{:#}", e)))?;
        let clients = ClientBuilder::from_config(config).map_err(Error::Client)?;
        Ok(self.with_clients(clients))
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    fn clients(&self, allow_api: bool, what: impl FnOnce() -> String) -> Result<&ClientBuilder> {
        match &self.clients {
            Some(clients) if allow_api => Ok(clients),
            _ => Err(Error::ApiRequired(what())),
        }
    }

    /// The azurerm types `id` can be imported as. Polymorphic ARM types are narrowed down to
    /// the one type matching the live resource.
    pub async fn query_type(&self, id: &ResourceId, allow_api: bool) -> Result<Vec<String>> {
        let candidates = self.catalog.candidate_types(id);
        match candidates.as_slice() {
            [] => Err(Error::NoCandidate(id.to_string())),
            [only] => Ok(vec![only.to_string()]),
            many if resolve::is_polymorphic(id) => {
                tracing::debug!("{} is one of {:?}", id, many);
                let clients = self.clients(allow_api, || format!("the type of {}", id))?;
                let resource_type = resolve::resolve_polymorphic_type(clients, id).await?;
                Ok(vec![resource_type.to_string()])
            }
            many => Ok(many.iter().map(|t| t.to_string()).collect()),
        }
    }

    /// The import id of `id` as `resource_type`.
    pub async fn query_id(&self, id: &ResourceId, resource_type: &str, allow_api: bool) -> Result<String> {
        if tfid::needs_api(resource_type) {
            let clients = self.clients(allow_api, || format!("the import id of {} as {}", id, resource_type))?;
            tfid::dynamic_build(self.catalog, clients, id, resource_type).await
        } else {
            tfid::static_build(self.catalog, id, resource_type)
        }
    }

    async fn resolve_one(&self, id: &ResourceId, allow_api: bool, out: &mut Vec<Resolved>) -> Result<()> {
        for resource_type in self.query_type(id, allow_api).await? {
            let import_id = self.query_id(id, &resource_type, allow_api).await?;
            out.push(Resolved { resource_type, import_id });
        }
        Ok(())
    }

    /// Types and import ids of `id` and, with API access, of the associations hanging off it.
    pub async fn query_type_and_id(&self, id: &ResourceId, allow_api: bool) -> Result<Vec<Resolved>> {
        let mut resolved = Vec::new();
        self.resolve_one(id, allow_api, &mut resolved).await?;

        if allow_api && populate::has_associations(id) {
            let clients = self.clients(allow_api, || format!("the associations of {}", id))?;
            for association in populate::populate_associations(clients, id).await? {
                self.resolve_one(&association, allow_api, &mut resolved).await?;
            }
        }
        Ok(resolved)
    }
}
