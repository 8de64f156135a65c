use chrono::NaiveDate;
use geo::{Area, BoundingRect};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{HarvestError, Result};
use crate::geometry::read_wkt;

/// Role used for parties that don't declare one.
pub const UNKNOWN_ROLE: &str = "UNKNOWN";

/// A catalog record, as sent to the search index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: Option<String>,
    pub parent_id: Option<String>,
    pub schema_id: Option<String>,
    pub catalog_version: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub language_code: Option<String>,
    pub thumbnail_url: Option<Url>,
    pub geometry: Option<GeometryAttributes>,
    pub document: Option<String>,
    pub link: Option<Url>,
    pub published_on: Option<NaiveDate>,
    pub parties: PartyMap,
    pub online_resources: Vec<OnlineResource>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_schema(mut self, schema_id: impl Into<String>) -> Self {
        self.schema_id = Some(schema_id.into());
        self
    }

    pub fn with_catalog_version(mut self, version: impl Into<String>) -> Self {
        self.catalog_version = Some(version.into());
        self
    }

    /// Id set by the harvester, ignoring blank values.
    pub fn known_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Sets the record geometry and derives its area and bounding box from it.
    pub fn set_geometry(&mut self, wkt: &str) -> Result<()> {
        let geometry = read_wkt(wkt)?;
        let rect = geometry
            .bounding_rect()
            .ok_or_else(|| HarvestError::GeometryParse(format!("empty geometry: {}", wkt)))?;

        self.geometry = Some(GeometryAttributes {
            wkt: wkt.to_string(),
            area: geometry.unsigned_area(),
            bbox: Bbox::new(rect.max().y, rect.max().x, rect.min().y, rect.min().x),
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryAttributes {
    pub wkt: String,
    pub area: f64,
    pub bbox: Bbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    pub north: f64,
    pub east: f64,
    pub south: f64,
    pub west: f64,
    pub area: f64,
}

impl Bbox {
    pub fn new(north: f64, east: f64, south: f64, west: f64) -> Self {
        Self {
            north,
            east,
            south,
            west,
            area: (north - south) * (east - west),
        }
    }
}

/// Parties of a record grouped by role, in the order roles were first seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyMap(IndexMap<String, Vec<ResponsibleParty>>);

impl PartyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, party: ResponsibleParty) {
        let role = party.role.clone().unwrap_or_else(|| UNKNOWN_ROLE.to_string());
        self.0.entry(role).or_default().push(party);
    }

    pub fn get(&self, role: &str) -> Option<&[ResponsibleParty]> {
        self.0.get(role).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ResponsibleParty])> {
        self.0.iter().map(|(role, parties)| (role.as_str(), parties.as_slice()))
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsibleParty {
    pub name: Option<String>,
    pub organisation: Option<String>,
    pub position: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub website: Option<OnlineResource>,
}

impl ResponsibleParty {
    /// Text block indexed for this party. URLs and the role are left out.
    pub fn render(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(name) = &self.name {
            parts.push(match &self.position {
                Some(position) => format!("{} ({})", name, position),
                None => name.clone(),
            });
        }
        if let Some(organisation) = &self.organisation {
            parts.push(organisation.clone());
        }
        if let Some(phone) = &self.phone {
            parts.push(format!("Phone: {}", phone));
        }
        if let Some(address) = &self.address {
            parts.push(address.clone());
        }
        if let Some(email) = &self.email {
            parts.push(email.clone());
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }
}

/// Joins the non-empty address lines with `", "`.
pub fn join_address<I>(parts: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let parts: Vec<String> = parts
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

pub const WMS_GET_MAP_PROTOCOL: &str = "OGC:WMS-1.1.1-http-get-map";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OnlineResource {
    pub protocol: Option<String>,
    pub linkage: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl OnlineResource {
    /// Name, or description when there is no name.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().or(self.description.as_deref())
    }

    pub fn render(&self) -> Option<String> {
        let text = if self.protocol.as_deref() == Some(WMS_GET_MAP_PROTOCOL) {
            self.name.as_ref().map(|name| format!("Layer: {}", name))
        } else {
            self.label().map(str::to_string)
        };
        text.filter(|text| !text.is_empty())
    }
}
