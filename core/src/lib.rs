//! Synchronous client core for the server-provisioning API's sites resource.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A caller-supplied
//! `Transport` runs the round-trip, keeping the core deterministic and
//! testable.
//!
//! # Design
//! - `ForgeClient` is stateless; it holds only `base_url`.
//! - `SitesManager` exposes list/get/create for a server; `Site` carries the
//!   per-site update/install/uninstall/delete operations.
//! - Each operation exists as `build_*` (request), `parse_*`/`apply_*`
//!   (response) and a composed method taking `&impl Transport`.
//! - Application variants are a closed enum dispatched to a fixed path
//!   segment.
//! - Form bodies are encoded from serde DTOs with `serde_urlencoded`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod sites;
pub mod types;

pub use client::ForgeClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use sites::{
    Application, ApplicationKind, CreateSite, GitApplication, GitProvider, InstallRequest, Site,
    SitesManager, WordPressApplication,
};
pub use types::{
    CreateSiteRequest, InstallGitRequest, InstallWordPressRequest, ProjectType, ServerId,
    SiteAttributes, SiteId, SiteStatus,
};
