//! ISO 19115-3:2018 (`mdb:MD_Metadata`).

use super::{
    DatePaths, ExtentPaths, PartyPaths, PhoneRule, ResourcePaths, SchemaPaths, Value,
};
use crate::geometry::AxisOrder;

pub static ISO19115_3_2018: SchemaPaths = SchemaPaths {
    name: "iso19115-3.2018",
    identifier: Value::CharacterString(&[
        "mdb:metadataIdentifier",
        "mcc:MD_Identifier",
        "mcc:code",
    ]),
    parent_identifier: Value::Attribute(&["mdb:parentMetadata"], "uuidref"),
    contacts: &["mdb:contact", "cit:CI_Responsibility"],
    data_identification: &["mdb:identificationInfo", "mri:MD_DataIdentification"],
    citation: &["mri:citation", "cit:CI_Citation"],
    title: Value::CharacterString(&["cit:title"]),
    abstract_text: Value::CharacterString(&["mri:abstract"]),
    points_of_contact: &["mri:pointOfContact", "cit:CI_Responsibility"],
    cited_parties: &["cit:citedResponsibleParty", "cit:CI_Responsibility"],
    browse_graphics: &["mri:graphicOverview", "mcc:MD_BrowseGraphic"],
    graphic_description: Value::CharacterString(&["mcc:fileDescription"]),
    graphic_file: Value::CharacterString(&["mcc:fileName"]),
    language: &[Value::Attribute(
        &[
            "mri:defaultLocale",
            "lan:PT_Locale",
            "lan:language",
            "lan:LanguageCode",
        ],
        "codeListValue",
    )],
    extent: ExtentPaths {
        geographic_elements: &["mri:extent", "gex:EX_Extent", "gex:geographicElement"],
        bounding_boxes: "gex:EX_GeographicBoundingBox",
        north: Value::Text(&["gex:northBoundLatitude"]),
        east: Value::Text(&["gex:eastBoundLongitude"]),
        south: Value::Text(&["gex:southBoundLatitude"]),
        west: Value::Text(&["gex:westBoundLongitude"]),
        polygons: &["gex:EX_BoundingPolygon", "gex:polygon"],
        axis_order: AxisOrder::LatLon,
    },
    transfer_resources: &[
        "mdb:distributionInfo",
        "mrd:MD_Distribution",
        "mrd:transferOptions",
        "mrd:MD_DigitalTransferOptions",
        "mrd:onLine",
        "cit:CI_OnlineResource",
    ],
    metadata_linkage: Some(&["mdb:metadataLinkage", "cit:CI_OnlineResource"]),
    resource: ResourcePaths {
        protocol: Value::CharacterString(&["cit:protocol"]),
        name: Value::CharacterString(&["cit:name"]),
        description: Value::CharacterString(&["cit:description"]),
        linkage: Value::CharacterString(&["cit:linkage"]),
    },
    party: PartyPaths {
        role: Value::Attribute(&["cit:role", "cit:CI_RoleCode"], "codeListValue"),
        organisation: Value::CharacterString(&["cit:party", "cit:CI_Organisation", "cit:name"]),
        individual: &["cit:party", "cit:CI_Individual"],
        name: Value::CharacterString(&["cit:name"]),
        position: Value::CharacterString(&["cit:positionName"]),
        contact: &["cit:contactInfo", "cit:CI_Contact"],
        phone: PhoneRule::Typed {
            entries: &["cit:phone", "cit:CI_Telephone"],
            number_type: Value::Attribute(
                &["cit:numberType", "cit:CI_TelephoneTypeCode"],
                "codeListValue",
            ),
            number: Value::CharacterString(&["cit:number"]),
            wanted: "voice",
        },
        address: &["cit:address", "cit:CI_Address"],
        address_lines: [
            &["cit:deliveryPoint"],
            &["cit:city"],
            &["cit:postalCode"],
            &["cit:administrativeArea"],
            &["cit:country"],
        ],
        email: Value::CharacterString(&["cit:electronicMailAddress"]),
        website: &["cit:onlineResource", "cit:CI_OnlineResource"],
    },
    dates: DatePaths {
        citation_dates: &["cit:date", "cit:CI_Date"],
        date_type: Value::Attribute(&["cit:dateType", "cit:CI_DateTypeCode"], "codeListValue"),
        date_value: &[
            Value::Text(&["cit:date", "gco:DateTime"]),
            Value::Text(&["cit:date", "gco:Date"]),
        ],
        date_stamp: &[
            Value::Text(&["mdb:dateInfo", "cit:CI_Date", "cit:date", "gco:DateTime"]),
            Value::Text(&["mdb:dateInfo", "cit:CI_Date", "cit:date", "gco:Date"]),
        ],
    },
};
