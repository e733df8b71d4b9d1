//! Configuration loading from the process environment.
//!
//! | variable           | default          |
//! |--------------------|------------------|
//! | `BIND_ADDR`        | `0.0.0.0:8080`   |
//! | `STORE_TITLE`      | `Boutique Ado`   |
//! | `CATALOG_FIXTURES` | built-in demo    |

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::warn;

use crate::fixtures::{CatalogFixture, FixtureError};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_STORE_TITLE: &str = "Boutique Ado";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store_title: String,
    /// JSON fixture to seed the catalog from; `None` seeds the demo catalog.
    pub catalog_fixtures: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Invalid values fall back to the
    /// defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default_addr: SocketAddr = DEFAULT_BIND_ADDR
            .parse()
            .unwrap_or(SocketAddr::from(([0, 0, 0, 0], 8080)));

        let bind_addr = match lookup("BIND_ADDR") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "BIND_ADDR is not a socket address; using {DEFAULT_BIND_ADDR}");
                default_addr
            }),
            None => default_addr,
        };

        let store_title = match lookup("STORE_TITLE") {
            Some(raw) if !raw.trim().is_empty() => raw,
            Some(_) => {
                warn!("STORE_TITLE is blank; using {DEFAULT_STORE_TITLE}");
                DEFAULT_STORE_TITLE.to_string()
            }
            None => DEFAULT_STORE_TITLE.to_string(),
        };

        let catalog_fixtures = lookup("CATALOG_FIXTURES")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        Self {
            bind_addr,
            store_title,
            catalog_fixtures,
        }
    }

    pub fn load_catalog(&self) -> Result<CatalogFixture, FixtureError> {
        match &self.catalog_fixtures {
            Some(path) => CatalogFixture::from_path(path),
            None => CatalogFixture::demo(),
        }
    }
}
