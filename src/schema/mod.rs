//! # Schema tables
//!
//! Both supported metadata schemas carry the same information in differently named
//! elements. Each schema is described by one static [`SchemaPaths`] table, and a
//! single [`MetadataParser`](crate::parser::MetadataParser) walks any record with it.
//!
//! A path is a list of lookup steps. Every step searches all descendants of the
//! current element by qualified name and may list alternatives separated by `|`
//! (see [`Element::find_all`]).

pub mod iso19115_3;
pub mod iso19139;

use crate::geometry::AxisOrder;
use crate::xml::Element;

pub use iso19115_3::ISO19115_3_2018;
pub use iso19139::ISO19139;

pub type Path = &'static [&'static str];

/// Where the value of a field is read from, relative to some element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// Free text wrapped in `gco:CharacterString` (or an anchor) below the path.
    CharacterString(Path),
    /// Text content of the element at the end of the path.
    Text(Path),
    /// Attribute of the element at the end of the path.
    Attribute(Path, &'static str),
}

impl Value {
    pub fn read(&self, element: &Element) -> Option<String> {
        match self {
            Value::CharacterString(path) => element.select(path)?.character_string(),
            Value::Text(path) => element.select(path)?.text(),
            Value::Attribute(path, name) => element.select(path)?.attribute_value(name),
        }
    }
}

/// First value found among `candidates`.
pub fn read_first(candidates: &[Value], element: &Element) -> Option<String> {
    candidates.iter().find_map(|value| value.read(element))
}

#[derive(Debug, Clone, Copy)]
pub struct ResourcePaths {
    pub protocol: Value,
    pub name: Value,
    pub description: Value,
    pub linkage: Value,
}

#[derive(Debug, Clone, Copy)]
pub enum PhoneRule {
    /// A single voice number.
    Voice(Value),
    /// A list of typed numbers; the last one of type `wanted` is used.
    Typed {
        entries: Path,
        number_type: Value,
        number: Value,
        wanted: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct PartyPaths {
    pub role: Value,
    pub organisation: Value,
    /// Element holding the person details; the party element itself when empty.
    pub individual: Path,
    pub name: Value,
    pub position: Value,
    /// `CI_Contact` below the individual, or below the party as a fallback.
    pub contact: Path,
    pub phone: PhoneRule,
    pub address: Path,
    /// Delivery point, city, postal code, administrative area, country.
    pub address_lines: [Path; 5],
    pub email: Value,
    pub website: Path,
}

#[derive(Debug, Clone, Copy)]
pub struct ExtentPaths {
    /// Geographic elements, relative to the data identification.
    pub geographic_elements: Path,
    pub bounding_boxes: &'static str,
    pub north: Value,
    pub east: Value,
    pub south: Value,
    pub west: Value,
    /// GML geometry holders, relative to a geographic element.
    pub polygons: Path,
    pub axis_order: AxisOrder,
}

#[derive(Debug, Clone, Copy)]
pub struct DatePaths {
    /// `CI_Date` entries, relative to the data citation.
    pub citation_dates: Path,
    pub date_type: Value,
    pub date_value: &'static [Value],
    /// Metadata record date, relative to the root.
    pub date_stamp: &'static [Value],
}

#[derive(Debug)]
pub struct SchemaPaths {
    pub name: &'static str,
    pub identifier: Value,
    pub parent_identifier: Value,
    /// Metadata contact party elements, relative to the root.
    pub contacts: Path,
    pub data_identification: Path,
    /// Citation block, relative to the data identification.
    pub citation: Path,
    pub title: Value,
    pub abstract_text: Value,
    /// Point of contact party elements, relative to the data identification.
    pub points_of_contact: Path,
    /// Cited party elements, relative to the citation.
    pub cited_parties: Path,
    pub browse_graphics: Path,
    pub graphic_description: Value,
    pub graphic_file: Value,
    /// Language sources tried in order, relative to the data identification.
    pub language: &'static [Value],
    pub extent: ExtentPaths,
    /// Online resource elements of the distribution, relative to the root.
    pub transfer_resources: Path,
    /// Online resource element of the record's own page, relative to the root.
    pub metadata_linkage: Option<Path>,
    pub resource: ResourcePaths,
    pub party: PartyPaths,
    pub dates: DatePaths,
}
