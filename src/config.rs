use crate::document::{PlainTextFormatter, TextFormatter};
use crate::lookup::LookupTables;
use crate::model::OnlineResource;

pub const POINT_OF_TRUTH_PROTOCOL: &str = "WWW:LINK-1.0-http--metadata-URL";
pub const POINT_OF_TRUTH_LABEL: &str = "point of truth";

/// How the online resource holding the canonical record URL is recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointOfTruthRule {
    pub protocol: String,
    /// Matched case-insensitively against the resource name (or description).
    pub label_substring: String,
}

impl Default for PointOfTruthRule {
    fn default() -> Self {
        Self {
            protocol: POINT_OF_TRUTH_PROTOCOL.to_string(),
            label_substring: POINT_OF_TRUTH_LABEL.to_string(),
        }
    }
}

impl PointOfTruthRule {
    pub fn matches(&self, resource: &OnlineResource) -> bool {
        if resource.linkage.is_none() || resource.protocol.as_deref() != Some(self.protocol.as_str()) {
            return false;
        }
        resource.label().is_some_and(|label| {
            label
                .to_lowercase()
                .contains(&self.label_substring.to_lowercase())
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Base URL the harvester talks to, e.g. `http://geonetwork:8080/geonetwork`.
    pub internal_url: String,
    /// Base URL users see, when different from the internal one.
    pub public_url: Option<String>,
    pub point_of_truth: PointOfTruthRule,
}

impl CatalogConfig {
    pub fn new(internal_url: impl Into<String>) -> Self {
        Self {
            internal_url: trim_base(internal_url.into()),
            public_url: None,
            point_of_truth: PointOfTruthRule::default(),
        }
    }

    pub fn with_public_url(mut self, public_url: impl Into<String>) -> Self {
        let public_url = trim_base(public_url.into());
        self.public_url = if public_url.is_empty() {
            None
        } else {
            Some(public_url)
        };
        self
    }

    pub fn with_point_of_truth(mut self, rule: PointOfTruthRule) -> Self {
        self.point_of_truth = rule;
        self
    }

    /// Base URL for links shown to users.
    pub fn public_base(&self) -> &str {
        self.public_url.as_deref().unwrap_or(&self.internal_url)
    }
}

fn trim_base(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

static PLAIN_TEXT: PlainTextFormatter = PlainTextFormatter;

/// Everything a parser needs besides the record itself.
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    pub catalog: &'a CatalogConfig,
    pub tables: &'a LookupTables,
    pub formatter: &'a dyn TextFormatter,
}

impl<'a> ParseContext<'a> {
    pub fn new(catalog: &'a CatalogConfig, tables: &'a LookupTables) -> Self {
        Self {
            catalog,
            tables,
            formatter: &PLAIN_TEXT,
        }
    }

    pub fn with_formatter(mut self, formatter: &'a dyn TextFormatter) -> Self {
        self.formatter = formatter;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(protocol: &str, name: Option<&str>, description: Option<&str>) -> OnlineResource {
        OnlineResource {
            protocol: Some(protocol.to_string()),
            linkage: Some("https://eatlas.org.au/data/uuid/abc".to_string()),
            name: name.map(str::to_string),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_point_of_truth_rule() {
        let rule = PointOfTruthRule::default();
        assert!(rule.matches(&resource(
            POINT_OF_TRUTH_PROTOCOL,
            Some("Point of truth URL of this metadata record"),
            None
        )));
        assert!(rule.matches(&resource(
            POINT_OF_TRUTH_PROTOCOL,
            None,
            Some("POINT OF TRUTH")
        )));
        assert!(!rule.matches(&resource(
            "WWW:LINK-1.0-http--link",
            Some("Point of truth"),
            None
        )));
        assert!(!rule.matches(&resource(POINT_OF_TRUTH_PROTOCOL, Some("Metadata"), None)));

        let mut no_link = resource(POINT_OF_TRUTH_PROTOCOL, Some("Point of truth"), None);
        no_link.linkage = None;
        assert!(!rule.matches(&no_link));
    }

    #[test]
    fn test_catalog_config_urls() {
        let config = CatalogConfig::new("http://eatlas-geonetwork/geonetwork/");
        assert_eq!(config.internal_url, "http://eatlas-geonetwork/geonetwork");
        assert_eq!(config.public_base(), "http://eatlas-geonetwork/geonetwork");

        let config = config.with_public_url("https://eatlas.org.au/geonetwork");
        assert_eq!(config.public_base(), "https://eatlas.org.au/geonetwork");

        let config = CatalogConfig::new("http://a").with_public_url("  ");
        assert_eq!(config.public_url, None);
    }
}
