use std::collections::HashMap;

use crate::parser::MetadataParser;
use crate::schema::{ISO19115_3_2018, ISO19139};
use crate::xml::Element;

/// Schema identifiers handled by the ISO 19139 parser.
pub const ISO19139_SCHEMA_IDS: &[&str] = &[
    "iso19139",
    "iso19139.anzlic",
    "iso19139.mcp",
    "iso19139.mcp-1.4",
];

pub const ISO19115_3_2018_SCHEMA_ID: &str = "iso19115-3.2018";

/// Chooses the parser for a catalog schema identifier.
pub trait ParserFactory: Send + Sync {
    /// `None` for schemas no parser is registered for.
    fn parser(&self, schema_id: &str) -> Option<MetadataParser>;
}

#[derive(Debug, Clone)]
pub struct DefaultParserFactory {
    parsers: HashMap<String, MetadataParser>,
}

impl Default for DefaultParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultParserFactory {
    pub fn new() -> Self {
        let mut factory = Self {
            parsers: HashMap::new(),
        };
        for schema_id in ISO19139_SCHEMA_IDS {
            factory.register(*schema_id, MetadataParser::new(&ISO19139));
        }
        factory.register(ISO19115_3_2018_SCHEMA_ID, MetadataParser::new(&ISO19115_3_2018));
        factory
    }

    pub fn register(&mut self, schema_id: impl Into<String>, parser: MetadataParser) {
        self.parsers.insert(schema_id.into(), parser);
    }

    pub fn schema_ids(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }
}

impl ParserFactory for DefaultParserFactory {
    fn parser(&self, schema_id: &str) -> Option<MetadataParser> {
        self.parsers.get(schema_id.trim()).copied()
    }
}

/// Guesses the schema identifier from the root element of a record.
pub fn detect_schema(root: &Element) -> Option<&'static str> {
    match root.name() {
        "gmd:MD_Metadata" => Some("iso19139"),
        "mcp:MD_Metadata" => Some("iso19139.mcp"),
        "mdb:MD_Metadata" => Some(ISO19115_3_2018_SCHEMA_ID),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_schemas() {
        let factory = DefaultParserFactory::new();

        let anzlic = factory.parser("iso19139.anzlic").unwrap();
        let mcp = factory.parser("iso19139.mcp-1.4").unwrap();
        assert!(std::ptr::eq(anzlic.schema(), mcp.schema()));
        assert_eq!(anzlic.schema().name, "iso19139");

        let modern = factory.parser("iso19115-3.2018").unwrap();
        assert_eq!(modern.schema().name, "iso19115-3.2018");

        assert!(factory.parser("dublin-core").is_none());
        assert!(factory.parser("").is_none());
        assert_eq!(factory.schema_ids().count(), 5);
    }

    #[test]
    fn test_register_extra_schema() {
        let mut factory = DefaultParserFactory::new();
        factory.register("iso19139.mcp-2.0", MetadataParser::new(&ISO19139));
        assert!(factory.parser("iso19139.mcp-2.0").is_some());
    }

    #[test]
    fn test_detect_schema() {
        let legacy = Element::parse("<gmd:MD_Metadata/>").unwrap();
        assert_eq!(detect_schema(&legacy), Some("iso19139"));
        let mcp = Element::parse("<mcp:MD_Metadata/>").unwrap();
        assert_eq!(detect_schema(&mcp), Some("iso19139.mcp"));
        let modern = Element::parse("<mdb:MD_Metadata/>").unwrap();
        assert_eq!(detect_schema(&modern), Some("iso19115-3.2018"));
        let other = Element::parse("<csw:Record/>").unwrap();
        assert_eq!(detect_schema(&other), None);
    }
}
