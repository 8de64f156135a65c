use crate::lookup::LookupTables;
use crate::model::OnlineResource;
use crate::model::PartyMap;

/// Role whose parties are kept on the record but never indexed as text.
pub const METADATA_CONTACT_ROLE: &str = "metadataContact";

/// Converts an abstract, usually written in catalog wiki markup, into plain text.
pub trait TextFormatter: Send + Sync {
    fn to_plain_text(&self, raw: &str) -> Option<String>;
}

/// Keeps the text as it is, apart from line endings and surrounding blanks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormatter;

impl TextFormatter for PlainTextFormatter {
    fn to_plain_text(&self, raw: &str) -> Option<String> {
        let text = raw.replace("\r\n", "\n").replace('\r', "\n");
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

/// Builds the indexed text body: abstract, parties by role, then online resources.
pub fn assemble_document(
    abstract_text: Option<&str>,
    parties: &PartyMap,
    online_resources: &[OnlineResource],
    tables: &LookupTables,
    formatter: &dyn TextFormatter,
) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    if let Some(text) = abstract_text.and_then(|raw| formatter.to_plain_text(raw)) {
        parts.push(text);
    }

    for (role, role_parties) in parties.iter() {
        if role == METADATA_CONTACT_ROLE {
            continue;
        }
        let mut block = vec![match tables.role_label(role) {
            Some(label) => label.to_string(),
            None => format!("Other ({})", role),
        }];
        block.extend(role_parties.iter().filter_map(|party| party.render()));
        parts.push(block.join("\n"));
    }

    parts.extend(online_resources.iter().filter_map(OnlineResource::render));

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}
