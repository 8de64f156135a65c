pub mod archive;
pub mod config;
pub mod dates;
pub mod document;
pub mod error;
pub mod factory;
pub mod geometry;
pub mod harvest;
pub mod links;
pub mod lookup;
pub mod messages;
pub mod model;
pub mod parser;
pub mod schema;
pub mod xml;

pub use archive::{ArchiveEntry, RecordArchive};
pub use config::{CatalogConfig, ParseContext, PointOfTruthRule};
pub use error::{HarvestError, Result};
pub use factory::{DefaultParserFactory, ParserFactory};
pub use harvest::parse_document;
pub use lookup::LookupTables;
pub use messages::{Level, Messages};
pub use model::{OnlineResource, Record, ResponsibleParty};
pub use parser::MetadataParser;
