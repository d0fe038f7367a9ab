//! The `Site` entity: one site on one server.
//!
//! # Design
//! A `Site` owns the last-known server representation of the site plus the
//! stateless `ForgeClient` it was loaded through. Accessors never touch the
//! network. Mutating operations follow the build/parse split: `build_*`
//! returns the request, the matching `apply_*`/`parse_*` interprets the
//! response, and the plain method (`update`, `install`, ...) runs both
//! through a `Transport`. Local state changes only after a successful
//! `update`; install/uninstall progress is observed by fetching the site
//! again.
//!
//! `Site` is not synchronized. Concurrent `update` calls on one instance need
//! caller-side locking, which `&mut self` already enforces in safe code.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::client::{check_status, parse_json, ForgeClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::sites::applications::Application;
use crate::types::{ProjectType, ServerId, SiteAttributes, SiteEnvelope, SiteId, SiteStatus};

/// Keys `update` requires at least one of.
pub const UPDATABLE_FIELDS: &[&str] = &["directory", "name", "wildcards"];

#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    client: ForgeClient,
    server_id: ServerId,
    attributes: SiteAttributes,
}

impl Site {
    pub fn new(client: ForgeClient, server_id: ServerId, attributes: SiteAttributes) -> Self {
        Self {
            client,
            server_id,
            attributes,
        }
    }

    pub fn id(&self) -> SiteId {
        self.attributes.id
    }

    pub fn server_id(&self) -> ServerId {
        self.server_id
    }

    pub fn domain(&self) -> &str {
        &self.attributes.name
    }

    pub fn directory(&self) -> &str {
        &self.attributes.directory
    }

    pub fn wildcards(&self) -> bool {
        self.attributes.wildcards
    }

    pub fn status(&self) -> SiteStatus {
        self.attributes.status
    }

    pub fn repository(&self) -> Option<&str> {
        self.attributes.repository.as_deref()
    }

    pub fn repository_provider(&self) -> Option<&str> {
        self.attributes.repository_provider.as_deref()
    }

    pub fn repository_branch(&self) -> Option<&str> {
        self.attributes.repository_branch.as_deref()
    }

    pub fn repository_status(&self) -> Option<&str> {
        self.attributes.repository_status.as_deref()
    }

    pub fn quick_deploy(&self) -> bool {
        self.attributes.quick_deploy
    }

    pub fn project_type(&self) -> ProjectType {
        self.attributes.project_type
    }

    /// Name of the installed application, if any.
    pub fn app(&self) -> Option<&str> {
        self.attributes.app.as_deref()
    }

    pub fn app_status(&self) -> Option<&str> {
        self.attributes.app_status.as_deref()
    }

    pub fn hipchat_room(&self) -> Option<&str> {
        self.attributes.hipchat_room.as_deref()
    }

    pub fn slack_channel(&self) -> Option<&str> {
        self.attributes.slack_channel.as_deref()
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.attributes.created_at
    }

    pub fn attributes(&self) -> &SiteAttributes {
        &self.attributes
    }

    fn path(&self) -> String {
        format!("servers/{}/sites/{}", self.server_id, self.attributes.id)
    }

    fn application_path(&self, app: &Application) -> String {
        format!("{}/{}", self.path(), app.segment())
    }

    // ---------------------------------------------------------------------
    // Update
    // ---------------------------------------------------------------------

    /// Build `PUT servers/{server}/sites/{site}` carrying `payload` as the
    /// whole form body. Fails before building anything unless at least one
    /// key is updatable; other keys are forwarded unchanged.
    pub fn build_update<I, K, V>(&self, payload: I) -> Result<HttpRequest, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let fields: BTreeMap<String, String> = payload
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        if !fields.keys().any(|key| UPDATABLE_FIELDS.contains(&key.as_str())) {
            return Err(ApiError::InvalidArgument(format!(
                "update payload has no updatable fields (expected one of {})",
                UPDATABLE_FIELDS.join(", ")
            )));
        }
        self.client.form_request(HttpMethod::Put, &self.path(), &fields)
    }

    /// Replace local state with the site returned by an update.
    pub fn apply_update(&mut self, response: HttpResponse) -> Result<bool, ApiError> {
        let envelope: SiteEnvelope = parse_json(&response)?;
        if envelope.site.id != self.attributes.id {
            return Err(ApiError::DeserializationError(format!(
                "update returned site {} for site {}",
                envelope.site.id, self.attributes.id
            )));
        }
        self.attributes = envelope.site;
        Ok(true)
    }

    pub fn update<T, I, K, V>(&mut self, transport: &T, payload: I) -> Result<bool, ApiError>
    where
        T: Transport,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let request = self.build_update(payload)?;
        debug!(server_id = self.server_id, site_id = self.id(), "updating site");
        let response = transport.execute(request)?;
        self.apply_update(response)
    }

    // ---------------------------------------------------------------------
    // Applications
    // ---------------------------------------------------------------------

    pub fn build_install(&self, app: &Application) -> Result<HttpRequest, ApiError> {
        let payload = app.install_request()?;
        self.client
            .form_request(HttpMethod::Post, &self.application_path(app), &payload)
    }

    /// Install `app`. Installation continues server-side; fetch the site again
    /// to observe `app_status`.
    pub fn install<T: Transport>(&self, transport: &T, app: &Application) -> Result<bool, ApiError> {
        let request = self.build_install(app)?;
        debug!(
            server_id = self.server_id,
            site_id = self.id(),
            segment = app.segment(),
            "installing application"
        );
        parse_ack(transport.execute(request)?)
    }

    pub fn build_uninstall(&self, app: &Application) -> HttpRequest {
        self.client
            .request(HttpMethod::Delete, &self.application_path(app))
    }

    pub fn uninstall<T: Transport>(&self, transport: &T, app: &Application) -> Result<bool, ApiError> {
        let request = self.build_uninstall(app);
        debug!(
            server_id = self.server_id,
            site_id = self.id(),
            segment = app.segment(),
            "uninstalling application"
        );
        parse_ack(transport.execute(request)?)
    }

    // ---------------------------------------------------------------------
    // Delete
    // ---------------------------------------------------------------------

    pub fn build_delete(&self) -> HttpRequest {
        self.client.request(HttpMethod::Delete, &self.path())
    }

    /// Delete the site on the server. The local value is stale afterwards.
    pub fn delete<T: Transport>(&self, transport: &T) -> Result<bool, ApiError> {
        let request = self.build_delete();
        debug!(server_id = self.server_id, site_id = self.id(), "deleting site");
        parse_ack(transport.execute(request)?)
    }
}

/// Status-only acknowledgement; the body is ignored.
pub fn parse_ack(response: HttpResponse) -> Result<bool, ApiError> {
    check_status(&response)?;
    Ok(true)
}
