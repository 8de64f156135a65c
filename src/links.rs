//! Catalog URLs: viewer links, thumbnails and public URL rewriting.

use url::Url;

use crate::config::CatalogConfig;
use crate::error::{HarvestError, Result};
use crate::model::Record;

pub const DEFAULT_MAJOR_VERSION: u32 = 3;

/// Major catalog version from a version string such as `"3.10.2"`.
pub fn major_version(version: Option<&str>) -> u32 {
    version
        .and_then(|version| version.trim().split('.').next())
        .and_then(|major| major.parse().ok())
        .unwrap_or(DEFAULT_MAJOR_VERSION)
}

/// Link to the record page of the catalog web interface.
///
/// Version 2 catalogs only understand the old `metadata.show` page; every other
/// version gets the single page application route.
pub fn catalog_viewer_link(record: &Record, base_url: &str, major_version: u32) -> Option<String> {
    let id = record.id.as_deref()?;
    let base_url = base_url.trim_end_matches('/');
    Some(match major_version {
        2 => format!("{}/srv/eng/metadata.show?uuid={}", base_url, id),
        _ => format!("{}/srv/eng/catalog.search#/metadata/{}", base_url, id),
    })
}

/// URL of a record thumbnail. Absolute file names are used as they are.
pub fn thumbnail_link(base_url: &str, id: &str, file_name: &str) -> String {
    if is_absolute_http(file_name) {
        return file_name.to_string();
    }
    format!(
        "{}/srv/eng/resources.get?uuid={}&fname={}&access=public",
        base_url.trim_end_matches('/'),
        id,
        file_name
    )
}

fn is_absolute_http(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Moves a URL pointing at the internal catalog onto the public catalog URL.
pub fn to_public_url(url: &str, catalog: &CatalogConfig) -> String {
    match (&catalog.public_url, url.strip_prefix(catalog.internal_url.as_str())) {
        (Some(public_url), Some(rest)) if !catalog.internal_url.is_empty() => {
            format!("{}{}", public_url, rest)
        }
        _ => url.to_string(),
    }
}

pub fn parse_url(value: &str) -> Result<Url> {
    Url::parse(value.trim()).map_err(|source| HarvestError::InvalidUrl {
        url: value.to_string(),
        source,
    })
}
