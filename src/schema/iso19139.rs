//! ISO 19139 (`gmd:MD_Metadata`), including the ANZLIC and MCP profiles.

use super::{
    DatePaths, ExtentPaths, PartyPaths, PhoneRule, ResourcePaths, SchemaPaths, Value,
};
use crate::geometry::AxisOrder;

pub static ISO19139: SchemaPaths = SchemaPaths {
    name: "iso19139",
    identifier: Value::CharacterString(&["gmd:fileIdentifier"]),
    parent_identifier: Value::CharacterString(&["gmd:parentIdentifier"]),
    contacts: &["gmd:contact", "gmd:CI_ResponsibleParty"],
    data_identification: &[
        "gmd:identificationInfo",
        "gmd:MD_DataIdentification|mcp:MD_DataIdentification",
    ],
    citation: &["gmd:citation", "gmd:CI_Citation"],
    title: Value::CharacterString(&["gmd:title"]),
    abstract_text: Value::CharacterString(&["gmd:abstract"]),
    points_of_contact: &["gmd:pointOfContact", "gmd:CI_ResponsibleParty"],
    cited_parties: &["gmd:citedResponsibleParty", "gmd:CI_ResponsibleParty"],
    browse_graphics: &["gmd:graphicOverview", "gmd:MD_BrowseGraphic"],
    graphic_description: Value::CharacterString(&["gmd:fileDescription"]),
    graphic_file: Value::CharacterString(&["gmd:fileName"]),
    language: &[
        Value::CharacterString(&["gmd:language"]),
        Value::Attribute(&["gmd:language", "gmd:LanguageCode"], "codeListValue"),
    ],
    extent: ExtentPaths {
        geographic_elements: &["gmd:extent", "gmd:EX_Extent", "gmd:geographicElement"],
        bounding_boxes: "gmd:EX_GeographicBoundingBox",
        north: Value::Text(&["gmd:northBoundLatitude"]),
        east: Value::Text(&["gmd:eastBoundLongitude"]),
        south: Value::Text(&["gmd:southBoundLatitude"]),
        west: Value::Text(&["gmd:westBoundLongitude"]),
        polygons: &["gmd:EX_BoundingPolygon", "gmd:polygon"],
        axis_order: AxisOrder::LonLat,
    },
    transfer_resources: &[
        "gmd:distributionInfo",
        "gmd:transferOptions",
        "gmd:MD_DigitalTransferOptions",
        "gmd:onLine",
        "gmd:CI_OnlineResource",
    ],
    metadata_linkage: None,
    resource: ResourcePaths {
        protocol: Value::CharacterString(&["gmd:protocol"]),
        name: Value::CharacterString(&["gmd:name"]),
        description: Value::CharacterString(&["gmd:description"]),
        linkage: Value::Text(&["gmd:linkage", "gmd:URL"]),
    },
    party: PartyPaths {
        role: Value::Attribute(&["gmd:role", "gmd:CI_RoleCode"], "codeListValue"),
        organisation: Value::CharacterString(&["gmd:organisationName"]),
        individual: &[],
        name: Value::CharacterString(&["gmd:individualName"]),
        position: Value::CharacterString(&["gmd:positionName"]),
        contact: &["gmd:contactInfo", "gmd:CI_Contact"],
        phone: PhoneRule::Voice(Value::CharacterString(&[
            "gmd:phone",
            "gmd:CI_Telephone",
            "gmd:voice",
        ])),
        address: &["gmd:address", "gmd:CI_Address"],
        address_lines: [
            &["gmd:deliveryPoint"],
            &["gmd:city"],
            &["gmd:postalCode"],
            &["gmd:administrativeArea"],
            &["gmd:country"],
        ],
        email: Value::CharacterString(&["gmd:electronicMailAddress"]),
        website: &["gmd:onlineResource", "gmd:CI_OnlineResource"],
    },
    dates: DatePaths {
        citation_dates: &["gmd:date", "gmd:CI_Date"],
        date_type: Value::Attribute(&["gmd:dateType", "gmd:CI_DateTypeCode"], "codeListValue"),
        date_value: &[
            Value::Text(&["gmd:date", "gco:DateTime"]),
            Value::Text(&["gmd:date", "gco:Date"]),
        ],
        date_stamp: &[
            Value::Text(&["gmd:dateStamp", "gco:DateTime"]),
            Value::Text(&["gmd:dateStamp", "gco:Date"]),
        ],
    },
};
