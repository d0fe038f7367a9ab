//! Collection-level site operations: list, get and create.
//!
//! # Design
//! Every operation takes the server id explicitly instead of deferring it to
//! a later `.from(server)` step. `create` keeps a fluent builder because it
//! accumulates options; its terminal `on` call takes the transport and server.

use tracing::debug;

use crate::client::{parse_json, ForgeClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::sites::site::Site;
use crate::types::{
    CreateSiteRequest, ProjectType, ServerId, SiteEnvelope, SiteId, SitesEnvelope,
};

/// Entry point for site operations on any server.
#[derive(Debug, Clone)]
pub struct SitesManager {
    client: ForgeClient,
}

impl SitesManager {
    pub fn new(client: ForgeClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ForgeClient {
        &self.client
    }

    fn collection_path(server_id: ServerId) -> String {
        format!("servers/{server_id}/sites")
    }

    pub fn build_list(&self, server_id: ServerId) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &Self::collection_path(server_id))
    }

    /// Decode the `sites` array, preserving server order.
    pub fn parse_list(&self, server_id: ServerId, response: HttpResponse) -> Result<Vec<Site>, ApiError> {
        let envelope: SitesEnvelope = parse_json(&response)?;
        Ok(envelope
            .sites
            .into_iter()
            .map(|attributes| Site::new(self.client.clone(), server_id, attributes))
            .collect())
    }

    pub fn list<T: Transport>(&self, transport: &T, server_id: ServerId) -> Result<Vec<Site>, ApiError> {
        debug!(server_id, "listing sites");
        let response = transport.execute(self.build_list(server_id))?;
        self.parse_list(server_id, response)
    }

    pub fn build_get(&self, server_id: ServerId, site_id: SiteId) -> HttpRequest {
        self.client.request(
            HttpMethod::Get,
            &format!("{}/{site_id}", Self::collection_path(server_id)),
        )
    }

    pub fn parse_get(&self, server_id: ServerId, response: HttpResponse) -> Result<Site, ApiError> {
        self.parse_site(server_id, &response)
    }

    pub fn get<T: Transport>(
        &self,
        transport: &T,
        server_id: ServerId,
        site_id: SiteId,
    ) -> Result<Site, ApiError> {
        debug!(server_id, site_id, "fetching site");
        let response = transport.execute(self.build_get(server_id, site_id))?;
        self.parse_get(server_id, response)
    }

    /// Start building a new site for `domain`.
    pub fn create(&self, domain: impl Into<String>) -> CreateSite<'_> {
        CreateSite {
            manager: self,
            domain: domain.into(),
            project_type: None,
            directory: None,
            wildcards: None,
            invalid: None,
        }
    }

    pub fn parse_create(&self, server_id: ServerId, response: HttpResponse) -> Result<Site, ApiError> {
        self.parse_site(server_id, &response)
    }

    fn parse_site(&self, server_id: ServerId, response: &HttpResponse) -> Result<Site, ApiError> {
        let envelope: SiteEnvelope = parse_json(response)?;
        Ok(Site::new(self.client.clone(), server_id, envelope.site))
    }
}

/// Fluent builder for `POST servers/{server}/sites`.
///
/// Validation errors are recorded as they happen and reported by `build`/`on`
/// before any request exists.
#[derive(Debug)]
#[must_use = "a site is only created by calling `on`"]
pub struct CreateSite<'a> {
    manager: &'a SitesManager,
    domain: String,
    project_type: Option<ProjectType>,
    directory: Option<String>,
    wildcards: Option<bool>,
    invalid: Option<String>,
}

impl CreateSite<'_> {
    pub fn project_type(mut self, project_type: ProjectType) -> Self {
        self.project_type = Some(project_type);
        self
    }

    pub fn as_php(self) -> Self {
        self.project_type(ProjectType::Php)
    }

    pub fn as_html(self) -> Self {
        self.project_type(ProjectType::Html)
    }

    pub fn as_symfony(self) -> Self {
        self.project_type(ProjectType::Symfony)
    }

    pub fn as_symfony_dev(self) -> Self {
        self.project_type(ProjectType::SymfonyDev)
    }

    pub fn as_symfony_four(self) -> Self {
        self.project_type(ProjectType::SymfonyFour)
    }

    /// Select the project type by its wire name, e.g. `"php"`.
    pub fn with_project_type(mut self, project_type: &str) -> Self {
        match project_type.parse() {
            Ok(parsed) => self.project_type = Some(parsed),
            Err(_) => {
                self.invalid
                    .get_or_insert_with(|| format!("unsupported project type {project_type:?}"));
            }
        }
        self
    }

    /// Web root relative to the site directory, e.g. `/public`.
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_wildcards(mut self, wildcards: bool) -> Self {
        self.wildcards = Some(wildcards);
        self
    }

    /// The validated form payload.
    pub fn request(&self) -> Result<CreateSiteRequest, ApiError> {
        if let Some(reason) = &self.invalid {
            return Err(ApiError::InvalidArgument(reason.clone()));
        }
        if self.domain.is_empty() {
            return Err(ApiError::InvalidArgument("domain must not be empty".to_string()));
        }
        if self.domain.trim() != self.domain {
            return Err(ApiError::InvalidArgument(format!(
                "domain {:?} has surrounding whitespace",
                self.domain
            )));
        }
        let project_type = self
            .project_type
            .ok_or_else(|| ApiError::InvalidArgument("project type must be selected".to_string()))?;

        Ok(CreateSiteRequest {
            domain: self.domain.clone(),
            project_type,
            directory: self.directory.clone(),
            wildcards: self.wildcards,
        })
    }

    pub fn build(&self, server_id: ServerId) -> Result<HttpRequest, ApiError> {
        let payload = self.request()?;
        self.manager.client.form_request(
            HttpMethod::Post,
            &SitesManager::collection_path(server_id),
            &payload,
        )
    }

    /// Create the site on `server_id`.
    pub fn on<T: Transport>(self, transport: &T, server_id: ServerId) -> Result<Site, ApiError> {
        let request = self.build(server_id)?;
        debug!(server_id, domain = %self.domain, "creating site");
        let response = transport.execute(request)?;
        self.manager.parse_create(server_id, response)
    }
}
