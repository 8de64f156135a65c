//! # Metadata record parser
//!
//! One traversal engine for every supported schema. [`MetadataParser`] reads the
//! element names it needs from a [`SchemaPaths`] table and fills a [`Record`] in a
//! single pass:
//!
//! 1. identity (id, parent id)
//! 2. metadata contacts
//! 3. title and abstract
//! 4. points of contact
//! 5. thumbnail
//! 6. language
//! 7. spatial extent
//! 8. online resources and the point of truth
//! 9. cited parties, then the root contacts again
//! 10. publication date
//! 11. document text
//! 12. canonical link
//!
//! Bad data never aborts a record: problems are reported to [`Messages`] and the
//! affected field is left empty or set to a fallback.

use geo::{LineString, Polygon};
use indexmap::IndexMap;
use tracing::debug;
use url::Url;

use crate::config::ParseContext;
use crate::dates::{published_date, CitationDate};
use crate::document::assemble_document;
use crate::error::{HarvestError, Result};
use crate::geometry::{
    bounding_box_to_polygon, parse_flat_coordinate_ring, parse_legacy_coordinate_ring,
    single_coordinate_to_square, union_polygons, DEFAULT_WKT,
};
use crate::links::{catalog_viewer_link, major_version, parse_url, thumbnail_link, to_public_url};
use crate::messages::{Level, Messages};
use crate::model::{join_address, OnlineResource, PartyMap, Record, ResponsibleParty};
use crate::schema::{read_first, PhoneRule, SchemaPaths, Value};
use crate::xml::Element;

const GML_POINT: &str = "gml:Point";
const GML_POLYGON: &str = "gml:Polygon";
const GML_MULTI_SURFACE: &str = "gml:MultiSurface";

/// Description used for browse graphics that don't have one.
pub const UNKNOWN_GRAPHIC: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy)]
pub struct MetadataParser {
    schema: &'static SchemaPaths,
}

impl MetadataParser {
    pub const fn new(schema: &'static SchemaPaths) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'static SchemaPaths {
        self.schema
    }

    /// Fills `record` from the metadata document rooted at `root`.
    ///
    /// An id already set on the record (from the catalog or a MEF `info.xml`) is
    /// kept; the document identifier is used only when it is missing.
    ///
    /// # Arguments
    ///
    /// * `record` - The record to fill. Every derived field is overwritten.
    /// * `root` - Root element of the metadata document.
    /// * `ctx` - Catalog URLs, lookup tables and the abstract formatter.
    /// * `messages` - Receives every data-quality problem found on the way.
    ///
    /// # Returns
    ///
    /// Nothing. A record always comes out of this, possibly with the default
    /// geometry or without a link; check `messages` for what went wrong.
    pub fn parse_record(
        &self,
        record: &mut Record,
        root: &Element,
        ctx: &ParseContext,
        messages: &mut Messages,
    ) {
        let paths = self.schema;
        debug!("Parsing record with the {} parser", paths.name);

        // Identity
        if record.known_id().is_none() {
            record.id = paths.identifier.read(root);
        }
        if record.id.is_none() {
            messages.add(Level::Warning, "Metadata record has no UUID.");
        }
        record.parent_id = paths.parent_identifier.read(root);
        let label = record_label(record);

        let mut parties = PartyMap::new();
        for element in root.select_all(paths.contacts) {
            parties.merge(self.parse_party(element));
        }

        let data_identification = root.select(paths.data_identification);
        let citation = data_identification.and_then(|element| element.select(paths.citation));
        record.title = citation.and_then(|element| paths.title.read(element));
        record.abstract_text = data_identification.and_then(|element| paths.abstract_text.read(element));

        if let Some(data_identification) = data_identification {
            for element in data_identification.select_all(paths.points_of_contact) {
                parties.merge(self.parse_party(element));
            }
        }

        record.thumbnail_url = data_identification
            .and_then(|element| self.parse_thumbnail(element, record.id.as_deref(), ctx, messages));

        record.language_code = data_identification
            .and_then(|element| read_first(paths.language, element))
            .and_then(|value| ctx.tables.language_code(&value));

        self.apply_extent(record, data_identification, &label, messages);

        let (online_resources, point_of_truth) =
            self.parse_online_resources(root, record.id.as_deref(), ctx, &label, messages);

        if let Some(citation) = citation {
            for element in citation.select_all(paths.cited_parties) {
                parties.merge(self.parse_party(element));
            }
        }
        for element in root.select_all(paths.contacts) {
            parties.merge(self.parse_party(element));
        }

        record.published_on = self.parse_published_date(root, citation);

        record.document = assemble_document(
            record.abstract_text.as_deref(),
            &parties,
            &online_resources,
            ctx.tables,
            ctx.formatter,
        );
        record.parties = parties;
        record.online_resources = online_resources;

        record.link = canonical_link(record, point_of_truth.as_deref(), ctx, &label, messages);
    }

    pub fn parse_party(&self, element: &Element) -> ResponsibleParty {
        let paths = &self.schema.party;

        let individual = element.select(paths.individual);
        let contact = individual
            .and_then(|individual| individual.select(paths.contact))
            .or_else(|| element.select(paths.contact));
        let address = contact.and_then(|contact| contact.select(paths.address));

        ResponsibleParty {
            name: individual.and_then(|individual| paths.name.read(individual)),
            organisation: paths.organisation.read(element),
            position: individual.and_then(|individual| paths.position.read(individual)),
            role: paths.role.read(element),
            phone: contact.and_then(|contact| parse_phone(&paths.phone, contact)),
            address: address.and_then(|address| {
                join_address(
                    paths
                        .address_lines
                        .iter()
                        .map(|line| Value::CharacterString(*line).read(address)),
                )
            }),
            email: address.and_then(|address| paths.email.read(address)),
            website: contact
                .and_then(|contact| contact.select(paths.website))
                .map(|resource| self.parse_online_resource(resource)),
        }
    }

    pub fn parse_online_resource(&self, element: &Element) -> OnlineResource {
        let paths = &self.schema.resource;
        OnlineResource {
            protocol: paths.protocol.read(element),
            linkage: paths.linkage.read(element),
            name: paths.name.read(element),
            description: paths.description.read(element),
        }
    }

    fn parse_thumbnail(
        &self,
        data_identification: &Element,
        id: Option<&str>,
        ctx: &ParseContext,
        messages: &mut Messages,
    ) -> Option<Url> {
        let paths = self.schema;

        let mut graphics: IndexMap<String, String> = IndexMap::new();
        for graphic in data_identification.select_all(paths.browse_graphics) {
            let Some(file_name) = paths.graphic_file.read(graphic) else {
                continue;
            };
            let description = paths
                .graphic_description
                .read(graphic)
                .unwrap_or_else(|| UNKNOWN_GRAPHIC.to_string());
            graphics.insert(description, file_name);
        }

        let file_name = select_thumbnail(&graphics)?;
        let thumbnail = thumbnail_link(ctx.catalog.public_base(), id.unwrap_or_default(), file_name);
        match parse_url(&thumbnail) {
            Ok(url) => Some(url),
            Err(err) => {
                messages.add_with_cause(
                    Level::Error,
                    format!(
                        "Invalid metadata thumbnail URL found in record {}: {}",
                        id.unwrap_or(UNKNOWN_GRAPHIC),
                        thumbnail
                    ),
                    &err,
                );
                None
            }
        }
    }

    fn apply_extent(
        &self,
        record: &mut Record,
        data_identification: Option<&Element>,
        label: &str,
        messages: &mut Messages,
    ) {
        let extent = match data_identification {
            Some(element) => self.collect_extent_polygons(element).and_then(|p| union_polygons(&p)),
            None => Ok(None),
        };

        let wkt = match extent {
            Ok(Some(wkt)) => wkt,
            Ok(None) => {
                messages.add(Level::Warning, format!("Metadata record {} has no extent.", label));
                DEFAULT_WKT.to_string()
            }
            Err(err) => {
                messages.add_with_cause(
                    Level::Error,
                    format!("Metadata record {} has an invalid extent", label),
                    &err,
                );
                messages.add(Level::Warning, format!("Metadata record {} has no extent.", label));
                DEFAULT_WKT.to_string()
            }
        };

        if let Err(err) = record.set_geometry(&wkt) {
            messages
                .add_with_cause(Level::Warning, "Invalid WKT", &err)
                .add_detail(format!("WKT: {}", wkt));
            if let Err(err) = record.set_geometry(DEFAULT_WKT) {
                messages.add_with_cause(Level::Error, "Invalid default WKT", &err);
            }
        }
    }

    /// Every rectangle, point and polygon of every geographic element.
    pub fn collect_extent_polygons(&self, data_identification: &Element) -> Result<Vec<Polygon<f64>>> {
        let paths = &self.schema.extent;
        let mut polygons = Vec::new();

        for geographic_element in data_identification.select_all(paths.geographic_elements) {
            for bbox in geographic_element.find_all(paths.bounding_boxes) {
                let bounds = (
                    read_bound(&paths.north, bbox, "northBoundLatitude")?,
                    read_bound(&paths.east, bbox, "eastBoundLongitude")?,
                    read_bound(&paths.south, bbox, "southBoundLatitude")?,
                    read_bound(&paths.west, bbox, "westBoundLongitude")?,
                );
                match bounds {
                    (Some(north), Some(east), Some(south), Some(west)) => {
                        polygons.push(bounding_box_to_polygon(north, east, south, west));
                    }
                    _ => debug!("Skipping incomplete bounding box"),
                }
            }

            for holder in geographic_element.select_all(paths.polygons) {
                for geometry in holder.elements() {
                    self.collect_gml_geometry(geometry, &mut polygons)?;
                }
            }
        }

        Ok(polygons)
    }

    fn collect_gml_geometry(&self, geometry: &Element, polygons: &mut Vec<Polygon<f64>>) -> Result<()> {
        let axis_order = self.schema.extent.axis_order;
        match geometry.name() {
            GML_POINT => {
                if let Some(pos) = geometry.find("gml:pos") {
                    let dimension = srs_dimension(pos)?;
                    let text = pos.text().unwrap_or_default();
                    if let Some(square) = single_coordinate_to_square(&text, dimension, axis_order)? {
                        polygons.push(square);
                    }
                }
            }
            GML_POLYGON => {
                if let Some(polygon) = self.parse_gml_polygon(geometry)? {
                    polygons.push(polygon);
                }
            }
            GML_MULTI_SURFACE => {
                for member in geometry.find_all("gml:surfaceMember") {
                    for polygon in member.find_all(GML_POLYGON) {
                        if let Some(polygon) = self.parse_gml_polygon(polygon)? {
                            polygons.push(polygon);
                        }
                    }
                }
            }
            other => debug!("Ignoring unsupported extent geometry {}", other),
        }
        Ok(())
    }

    fn parse_gml_polygon(&self, polygon: &Element) -> Result<Option<Polygon<f64>>> {
        let exterior = match polygon.select(&["gml:exterior", "gml:LinearRing"]) {
            Some(ring) => self.parse_linear_ring(ring)?,
            None => None,
        };
        let Some(exterior) = exterior else {
            return Ok(None);
        };

        let mut holes = Vec::new();
        for ring in polygon.select_all(&["gml:interior", "gml:LinearRing"]) {
            if let Some(hole) = self.parse_linear_ring(ring)? {
                holes.push(hole);
            }
        }
        Ok(Some(Polygon::new(exterior, holes)))
    }

    fn parse_linear_ring(&self, ring: &Element) -> Result<Option<LineString<f64>>> {
        if let Some(coordinates) = ring.find("gml:coordinates") {
            return Ok(coordinates
                .text()
                .and_then(|text| parse_legacy_coordinate_ring(&text)));
        }
        match ring.find("gml:posList") {
            Some(pos_list) => {
                let dimension = srs_dimension(pos_list)?;
                let text = pos_list.text().unwrap_or_default();
                parse_flat_coordinate_ring(&text, dimension, self.schema.extent.axis_order)
            }
            None => Ok(None),
        }
    }

    /// Splits distribution resources into plain online resources and the point of truth URL.
    fn parse_online_resources(
        &self,
        root: &Element,
        id: Option<&str>,
        ctx: &ParseContext,
        label: &str,
        messages: &mut Messages,
    ) -> (Vec<OnlineResource>, Option<String>) {
        let paths = self.schema;
        let rule = &ctx.catalog.point_of_truth;

        let candidates = root
            .select_all(paths.transfer_resources)
            .into_iter()
            .chain(paths.metadata_linkage.and_then(|path| root.select(path)));

        let mut online_resources = Vec::new();
        let mut point_of_truth: Option<String> = None;
        for element in candidates {
            let resource = self.parse_online_resource(element);
            if !rule.matches(&resource) {
                online_resources.push(resource);
                continue;
            }
            if point_of_truth.is_some() {
                messages.add(
                    Level::Warning,
                    format!("Metadata record UUID {} has multiple points of truth", label),
                );
                continue;
            }
            if let Some(linkage) = resource.linkage {
                if !id.is_some_and(|id| linkage.contains(id)) {
                    messages.add(
                        Level::Warning,
                        format!(
                            "Metadata record UUID {} point of truth is not pointing to itself: {}",
                            label, linkage
                        ),
                    );
                }
                point_of_truth = Some(linkage);
            }
        }

        (online_resources, point_of_truth)
    }

    fn parse_published_date(&self, root: &Element, citation: Option<&Element>) -> Option<chrono::NaiveDate> {
        let paths = &self.schema.dates;
        let citation_dates: Vec<CitationDate> = citation
            .map(|citation| {
                citation
                    .select_all(paths.citation_dates)
                    .into_iter()
                    .map(|date| CitationDate {
                        date_type: paths.date_type.read(date),
                        value: read_first(paths.date_value, date),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let date_stamp = read_first(paths.date_stamp, root);
        published_date(&citation_dates, date_stamp.as_deref())
    }
}

/// Picks the large thumbnail, else the thumbnail, else the first graphic listed.
pub fn select_thumbnail(graphics: &IndexMap<String, String>) -> Option<&str> {
    graphics
        .get("large_thumbnail")
        .or_else(|| graphics.get("thumbnail"))
        .or_else(|| graphics.values().next())
        .map(String::as_str)
}

fn parse_phone(rule: &PhoneRule, contact: &Element) -> Option<String> {
    match rule {
        PhoneRule::Voice(value) => value.read(contact),
        PhoneRule::Typed {
            entries,
            number_type,
            number,
            wanted,
        } => contact
            .select_all(entries)
            .into_iter()
            .filter(|telephone| {
                number_type
                    .read(telephone)
                    .is_some_and(|kind| kind.eq_ignore_ascii_case(wanted))
            })
            .filter_map(|telephone| number.read(telephone))
            .last(),
    }
}

fn read_bound(value: &Value, bbox: &Element, field: &'static str) -> Result<Option<f64>> {
    let Some(text) = value.read(bbox) else {
        return Ok(None);
    };
    match text.parse::<f64>() {
        Ok(bound) if bound.is_finite() => Ok(Some(bound)),
        _ => Err(HarvestError::InvalidNumber { field, value: text }),
    }
}

fn srs_dimension(element: &Element) -> Result<usize> {
    match element.attribute_value("srsDimension") {
        Some(value) => value.parse().map_err(|_| HarvestError::InvalidNumber {
            field: "srsDimension",
            value,
        }),
        None => Ok(2),
    }
}

fn record_label(record: &Record) -> String {
    record.id.clone().unwrap_or_else(|| "UNKNOWN".to_string())
}

/// Point of truth when it is a valid URL, else the catalog record page.
fn canonical_link(
    record: &Record,
    point_of_truth: Option<&str>,
    ctx: &ParseContext,
    label: &str,
    messages: &mut Messages,
) -> Option<Url> {
    if let Some(point_of_truth) = point_of_truth {
        let public = to_public_url(point_of_truth, ctx.catalog);
        match parse_url(&public) {
            Ok(url) => return Some(url),
            Err(err) => {
                messages.add_with_cause(
                    Level::Error,
                    format!(
                        "Invalid metadata record URL found in Point Of Truth of record {}: {}",
                        label, public
                    ),
                    &err,
                );
            }
        }
    }

    let version = major_version(record.catalog_version.as_deref());
    let link = catalog_viewer_link(record, ctx.catalog.public_base(), version)?;
    match parse_url(&link) {
        Ok(url) => Some(url),
        Err(err) => {
            messages.add_with_cause(
                Level::Error,
                format!("Invalid metadata record URL for record {}: {}", label, link),
                &err,
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::lookup::LookupTables;
    use crate::schema::{ISO19115_3_2018, ISO19139};

    fn legacy_record(body: &str) -> String {
        format!(
            r#"<gmd:MD_Metadata xmlns:gmd="http://www.isotc211.org/2005/gmd" xmlns:gco="http://www.isotc211.org/2005/gco" xmlns:gml="http://www.opengis.net/gml">
  <gmd:fileIdentifier><gco:CharacterString>abc-123</gco:CharacterString></gmd:fileIdentifier>
  {}
</gmd:MD_Metadata>"#,
            body
        )
    }

    fn parse_legacy(body: &str) -> (Record, Messages) {
        let root = Element::parse(&legacy_record(body)).unwrap();
        let config = CatalogConfig::new("http://geonetwork/geonetwork")
            .with_public_url("https://catalog.example.org/geonetwork");
        let tables = LookupTables::new();
        let ctx = ParseContext::new(&config, &tables);
        let mut record = Record::new().with_catalog_version("3.0");
        let mut messages = Messages::new();
        MetadataParser::new(&ISO19139).parse_record(&mut record, &root, &ctx, &mut messages);
        (record, messages)
    }

    #[test]
    fn test_select_thumbnail() {
        let mut graphics = IndexMap::new();
        graphics.insert("UNKNOWN".to_string(), "a.png".to_string());
        graphics.insert("thumbnail".to_string(), "b.png".to_string());
        assert_eq!(select_thumbnail(&graphics), Some("b.png"));

        graphics.insert("large_thumbnail".to_string(), "c.png".to_string());
        assert_eq!(select_thumbnail(&graphics), Some("c.png"));

        let mut graphics = IndexMap::new();
        graphics.insert("preview".to_string(), "first.png".to_string());
        graphics.insert("other".to_string(), "second.png".to_string());
        assert_eq!(select_thumbnail(&graphics), Some("first.png"));

        assert_eq!(select_thumbnail(&IndexMap::new()), None);
    }

    #[test]
    fn test_no_extent_gives_default_geometry_and_one_warning() {
        let (record, messages) = parse_legacy("");
        let geometry = record.geometry.unwrap();
        assert_eq!(geometry.wkt, DEFAULT_WKT);
        assert_eq!(geometry.area, 64800.0);
        assert_eq!(messages.count(Level::Warning), 1);
        assert_eq!(messages.count(Level::Error), 0);
        assert_eq!(
            record.link.unwrap().as_str(),
            "https://catalog.example.org/geonetwork/srv/eng/catalog.search#/metadata/abc-123"
        );
    }

    #[test]
    fn test_invalid_coordinate_is_reported() {
        let (record, messages) = parse_legacy(
            r#"<gmd:identificationInfo><gmd:MD_DataIdentification>
  <gmd:extent><gmd:EX_Extent><gmd:geographicElement><gmd:EX_BoundingPolygon><gmd:polygon>
    <gml:Polygon><gml:exterior><gml:LinearRing>
      <gml:posList>146 -18 NaN -18 147 -19 146 -18</gml:posList>
    </gml:LinearRing></gml:exterior></gml:Polygon>
  </gmd:polygon></gmd:EX_BoundingPolygon></gmd:geographicElement></gmd:EX_Extent></gmd:extent>
</gmd:MD_DataIdentification></gmd:identificationInfo>"#,
        );
        assert_eq!(record.geometry.unwrap().wkt, DEFAULT_WKT);
        assert_eq!(messages.count(Level::Error), 1);
        assert_eq!(messages.count(Level::Warning), 1);
        let error = messages.iter().find(|m| m.level == Level::Error).unwrap();
        assert_eq!(error.cause.as_deref(), Some("Invalid coordinate value: [NaN, -18]."));
    }

    #[test]
    fn test_polygon_with_coordinates_shell_and_pos_list_hole() {
        let (record, messages) = parse_legacy(
            r#"<gmd:identificationInfo><gmd:MD_DataIdentification>
  <gmd:extent><gmd:EX_Extent><gmd:geographicElement><gmd:EX_BoundingPolygon><gmd:polygon>
    <gml:Polygon>
      <gml:exterior><gml:LinearRing>
        <gml:coordinates>0,0 10,0 10,10 0,10</gml:coordinates>
        <gml:posList>50 50 60 50 60 60 50 60 50 50</gml:posList>
      </gml:LinearRing></gml:exterior>
      <gml:interior><gml:LinearRing>
        <gml:posList>2 2 2 4 4 4 4 2 2 2</gml:posList>
      </gml:LinearRing></gml:interior>
    </gml:Polygon>
  </gmd:polygon></gmd:EX_BoundingPolygon></gmd:geographicElement></gmd:EX_Extent></gmd:extent>
</gmd:MD_DataIdentification></gmd:identificationInfo>"#,
        );
        assert!(messages.is_empty(), "unexpected messages: {:?}", messages);

        let geometry = record.geometry.unwrap();
        assert_eq!(
            geometry.wkt,
            "POLYGON ((0 0, 0 10, 10 10, 10 0, 0 0), (2 2, 4 2, 4 4, 2 4, 2 2))"
        );
        assert_eq!(geometry.area, 96.0);
        assert_eq!(geometry.bbox.west, 0.0);
        assert_eq!(geometry.bbox.east, 10.0);
        assert_eq!(geometry.bbox.north, 10.0);
        assert_eq!(geometry.bbox.south, 0.0);
    }

    #[test]
    fn test_bounding_boxes_are_unioned() {
        let (record, messages) = parse_legacy(
            r#"<gmd:identificationInfo><gmd:MD_DataIdentification>
  <gmd:extent><gmd:EX_Extent>
    <gmd:geographicElement><gmd:EX_GeographicBoundingBox>
      <gmd:westBoundLongitude><gco:Decimal>0</gco:Decimal></gmd:westBoundLongitude>
      <gmd:eastBoundLongitude><gco:Decimal>1</gco:Decimal></gmd:eastBoundLongitude>
      <gmd:southBoundLatitude><gco:Decimal>0</gco:Decimal></gmd:southBoundLatitude>
      <gmd:northBoundLatitude><gco:Decimal>1</gco:Decimal></gmd:northBoundLatitude>
    </gmd:EX_GeographicBoundingBox></gmd:geographicElement>
    <gmd:geographicElement><gmd:EX_GeographicBoundingBox>
      <gmd:westBoundLongitude><gco:Decimal>10</gco:Decimal></gmd:westBoundLongitude>
      <gmd:eastBoundLongitude><gco:Decimal>11</gco:Decimal></gmd:eastBoundLongitude>
      <gmd:southBoundLatitude><gco:Decimal>0</gco:Decimal></gmd:southBoundLatitude>
      <gmd:northBoundLatitude><gco:Decimal>1</gco:Decimal></gmd:northBoundLatitude>
    </gmd:EX_GeographicBoundingBox></gmd:geographicElement>
  </gmd:EX_Extent></gmd:extent>
</gmd:MD_DataIdentification></gmd:identificationInfo>"#,
        );
        assert!(messages.is_empty(), "unexpected messages: {:?}", messages);
        let geometry = record.geometry.unwrap();
        assert_eq!(
            geometry.wkt,
            "MULTIPOLYGON (((0 0, 0 1, 1 1, 1 0, 0 0)), ((10 0, 10 1, 11 1, 11 0, 10 0)))"
        );
        assert_eq!(geometry.area, 2.0);
        assert_eq!(geometry.bbox.west, 0.0);
        assert_eq!(geometry.bbox.east, 11.0);
    }

    #[test]
    fn test_point_of_truth_not_pointing_to_itself() {
        let (record, messages) = parse_legacy(
            r#"<gmd:distributionInfo><gmd:MD_Distribution><gmd:transferOptions><gmd:MD_DigitalTransferOptions>
  <gmd:onLine><gmd:CI_OnlineResource>
    <gmd:linkage><gmd:URL>https://example.org/records/other-record</gmd:URL></gmd:linkage>
    <gmd:protocol><gco:CharacterString>WWW:LINK-1.0-http--metadata-URL</gco:CharacterString></gmd:protocol>
    <gmd:description><gco:CharacterString>Point of truth URL of this metadata record</gco:CharacterString></gmd:description>
  </gmd:CI_OnlineResource></gmd:onLine>
  <gmd:onLine><gmd:CI_OnlineResource>
    <gmd:linkage><gmd:URL>https://example.org/records/abc-123</gmd:URL></gmd:linkage>
    <gmd:protocol><gco:CharacterString>WWW:LINK-1.0-http--metadata-URL</gco:CharacterString></gmd:protocol>
    <gmd:name><gco:CharacterString>Point Of Truth</gco:CharacterString></gmd:name>
  </gmd:CI_OnlineResource></gmd:onLine>
</gmd:MD_DigitalTransferOptions></gmd:transferOptions></gmd:MD_Distribution></gmd:distributionInfo>"#,
        );

        assert_eq!(
            record.link.unwrap().as_str(),
            "https://example.org/records/other-record"
        );
        assert!(record.online_resources.is_empty());
        // no extent + not self + multiple
        assert_eq!(messages.count(Level::Warning), 3);
        assert!(messages
            .iter()
            .any(|m| m.text.contains("point of truth is not pointing to itself")));
        assert!(messages.iter().any(|m| m.text.contains("multiple points of truth")));
    }

    #[test]
    fn test_point_of_truth_on_internal_catalog_is_made_public() {
        let (record, _) = parse_legacy(
            r#"<gmd:distributionInfo><gmd:MD_Distribution><gmd:transferOptions><gmd:MD_DigitalTransferOptions>
  <gmd:onLine><gmd:CI_OnlineResource>
    <gmd:linkage><gmd:URL>http://geonetwork/geonetwork/srv/eng/catalog.search#/metadata/abc-123</gmd:URL></gmd:linkage>
    <gmd:protocol><gco:CharacterString>WWW:LINK-1.0-http--metadata-URL</gco:CharacterString></gmd:protocol>
    <gmd:name><gco:CharacterString>Point of truth</gco:CharacterString></gmd:name>
  </gmd:CI_OnlineResource></gmd:onLine>
</gmd:MD_DigitalTransferOptions></gmd:transferOptions></gmd:MD_Distribution></gmd:distributionInfo>"#,
        );
        assert_eq!(
            record.link.unwrap().as_str(),
            "https://catalog.example.org/geonetwork/srv/eng/catalog.search#/metadata/abc-123"
        );
    }

    #[test]
    fn test_invalid_thumbnail_is_reported() {
        let (record, messages) = parse_legacy(
            r#"<gmd:identificationInfo><gmd:MD_DataIdentification>
  <gmd:graphicOverview><gmd:MD_BrowseGraphic>
    <gmd:fileName><gco:CharacterString>http://</gco:CharacterString></gmd:fileName>
    <gmd:fileDescription><gco:CharacterString>thumbnail</gco:CharacterString></gmd:fileDescription>
  </gmd:MD_BrowseGraphic></gmd:graphicOverview>
</gmd:MD_DataIdentification></gmd:identificationInfo>"#,
        );
        assert!(record.thumbnail_url.is_none());
        assert_eq!(messages.count(Level::Error), 1);
        assert!(messages
            .iter()
            .any(|m| m.text.starts_with("Invalid metadata thumbnail URL found in record abc-123")));
    }

    #[test]
    fn test_metadata_contact_kept_but_not_indexed() {
        let (record, _) = parse_legacy(
            r#"<gmd:contact><gmd:CI_ResponsibleParty>
  <gmd:individualName><gco:CharacterString>Hidden Person</gco:CharacterString></gmd:individualName>
  <gmd:role><gmd:CI_RoleCode codeListValue="metadataContact"/></gmd:role>
</gmd:CI_ResponsibleParty></gmd:contact>
<gmd:contact><gmd:CI_ResponsibleParty>
  <gmd:organisationName><gco:CharacterString>Visible Org</gco:CharacterString></gmd:organisationName>
</gmd:CI_ResponsibleParty></gmd:contact>"#,
        );
        // root contacts go through the first and the last contact pass
        let hidden = record.parties.get("metadataContact").unwrap();
        assert_eq!(hidden.len(), 2);
        assert_eq!(hidden[0].name.as_deref(), Some("Hidden Person"));
        assert_eq!(hidden[0], hidden[1]);
        assert_eq!(record.parties.get("UNKNOWN").map(|p| p.len()), Some(2));

        let document = record.document.unwrap();
        assert!(!document.contains("Hidden Person"));
        assert!(document.contains("Other (UNKNOWN)\nVisible Org\nVisible Org"));
    }

    #[test]
    fn test_modern_party_with_typed_phones() {
        let xml = r#"<mdb:MD_Metadata xmlns:mdb="x" xmlns:cit="y" xmlns:gco="z">
  <mdb:contact><cit:CI_Responsibility>
    <cit:role><cit:CI_RoleCode codeListValue="custodian"/></cit:role>
    <cit:party><cit:CI_Organisation>
      <cit:name><gco:CharacterString>AIMS</gco:CharacterString></cit:name>
      <cit:contactInfo><cit:CI_Contact>
        <cit:address><cit:CI_Address>
          <cit:city><gco:CharacterString>Townsville</gco:CharacterString></cit:city>
        </cit:CI_Address></cit:address>
      </cit:CI_Contact></cit:contactInfo>
      <cit:individual><cit:CI_Individual>
        <cit:name><gco:CharacterString>Jane Doe</gco:CharacterString></cit:name>
        <cit:positionName><gco:CharacterString>Scientist</gco:CharacterString></cit:positionName>
        <cit:contactInfo><cit:CI_Contact>
          <cit:phone><cit:CI_Telephone>
            <cit:number><gco:CharacterString>111</gco:CharacterString></cit:number>
            <cit:numberType><cit:CI_TelephoneTypeCode codeListValue="facsimile"/></cit:numberType>
          </cit:CI_Telephone></cit:phone>
          <cit:phone><cit:CI_Telephone>
            <cit:number><gco:CharacterString>222</gco:CharacterString></cit:number>
            <cit:numberType><cit:CI_TelephoneTypeCode codeListValue="Voice"/></cit:numberType>
          </cit:CI_Telephone></cit:phone>
          <cit:address><cit:CI_Address>
            <cit:deliveryPoint><gco:CharacterString>PMB No 3</gco:CharacterString></cit:deliveryPoint>
            <cit:city><gco:CharacterString>Townsville MC</gco:CharacterString></cit:city>
            <cit:electronicMailAddress><gco:CharacterString>j.doe@example.org</gco:CharacterString></cit:electronicMailAddress>
          </cit:CI_Address></cit:address>
        </cit:CI_Contact></cit:contactInfo>
      </cit:CI_Individual></cit:individual>
    </cit:CI_Organisation></cit:party>
  </cit:CI_Responsibility></mdb:contact>
</mdb:MD_Metadata>"#;
        let root = Element::parse(xml).unwrap();
        let party_element = root.find("cit:CI_Responsibility").unwrap();
        let party = MetadataParser::new(&ISO19115_3_2018).parse_party(party_element);

        assert_eq!(party.role.as_deref(), Some("custodian"));
        assert_eq!(party.organisation.as_deref(), Some("AIMS"));
        assert_eq!(party.name.as_deref(), Some("Jane Doe"));
        assert_eq!(party.position.as_deref(), Some("Scientist"));
        assert_eq!(party.phone.as_deref(), Some("222"));
        assert_eq!(party.address.as_deref(), Some("PMB No 3, Townsville MC"));
        assert_eq!(party.email.as_deref(), Some("j.doe@example.org"));
    }
}
