//! The sites resource: the `SitesManager` collection entry point, the `Site`
//! entity and the applications that can be installed onto a site.

pub mod applications;
pub mod manager;
pub mod site;

pub use applications::{
    Application, ApplicationKind, GitApplication, GitProvider, InstallRequest, WordPressApplication,
};
pub use manager::{CreateSite, SitesManager};
pub use site::{Site, UPDATABLE_FIELDS};
