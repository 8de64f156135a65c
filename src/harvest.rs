//! Entry point for one harvested catalog record.

use tracing::debug;

use crate::config::ParseContext;
use crate::factory::{detect_schema, ParserFactory};
use crate::messages::{Level, Messages};
use crate::model::Record;
use crate::xml::Element;

/// Parses the metadata document of a harvested record.
///
/// `record` may already carry the id, schema and catalog version reported by the
/// catalog. When the schema is missing it is guessed from the root element.
///
/// # Arguments
///
/// * `record` - The record to fill.
/// * `xml` - The metadata document text.
/// * `factory` - Parser lookup by schema id.
/// * `ctx` - Shared parsing context.
/// * `messages` - Receives the problems found in the record.
///
/// # Returns
///
/// * `true` - The document was parsed. The record may still carry ERROR messages.
/// * `false` - The document is empty or has no root element, or no parser is
///   registered for its schema. Nothing was parsed and the reason is in `messages`.
pub fn parse_document(
    record: &mut Record,
    xml: &str,
    factory: &dyn ParserFactory,
    ctx: &ParseContext,
    messages: &mut Messages,
) -> bool {
    let label = record.known_id().unwrap_or("UNKNOWN").to_string();

    if xml.trim().is_empty() {
        messages.add(
            Level::Warning,
            format!("Metadata UUID {} has no metadata record.", label),
        );
        return false;
    }

    let root = match Element::parse(xml) {
        Ok(root) => root,
        Err(err) => {
            messages.add_with_cause(
                Level::Warning,
                format!("Metadata UUID {} has no root in its metadata document.", label),
                &err,
            );
            return false;
        }
    };

    let declared = record
        .schema_id
        .as_deref()
        .map(str::trim)
        .filter(|schema_id| !schema_id.is_empty())
        .map(str::to_string);
    let schema_id = match declared {
        Some(schema_id) => schema_id,
        None => match detect_schema(&root) {
            Some(detected) => {
                debug!("Metadata UUID {} detected schema {}", label, detected);
                record.schema_id = Some(detected.to_string());
                detected.to_string()
            }
            None => {
                messages.add(
                    Level::Warning,
                    format!("Metadata UUID {} has no defined metadata schema.", label),
                );
                return false;
            }
        },
    };

    let Some(parser) = factory.parser(&schema_id) else {
        messages.add(
            Level::Warning,
            format!("Metadata UUID {} has unsupported schema {}", label, schema_id),
        );
        return false;
    };

    parser.parse_record(record, &root, ctx, messages);
    true
}
