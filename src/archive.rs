//! Reading metadata records out of zip exports.
//!
//! Catalog exports (MEF) store one directory per record:
//!
//! ```text
//! {uuid}/info.xml
//! {uuid}/metadata/metadata.xml
//! ```
//!
//! `info.xml` gives the record uuid and schema. Plain zips of XML files work too;
//! their records get the id and schema from the document itself.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::error::Result;
use crate::model::Record;
use crate::xml::Element;

const MEF_INFO: &str = "info.xml";
const MEF_METADATA: &str = "metadata/metadata.xml";

#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Path of the metadata document inside the archive.
    pub path: String,
    /// Record pre-filled from `info.xml` when there is one.
    pub record: Record,
    pub xml: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MefInfo {
    uuid: Option<String>,
    schema: Option<String>,
}

impl MefInfo {
    fn parse(xml: &str) -> Result<MefInfo> {
        let root = Element::parse(xml)?;
        let general = root.find("general");
        Ok(MefInfo {
            uuid: general.and_then(|g| g.find("uuid")).and_then(Element::text),
            schema: general.and_then(|g| g.find("schema")).and_then(Element::text),
        })
    }
}

pub struct RecordArchive {
    path: PathBuf,
}

impl RecordArchive {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn entries(&self) -> Result<Vec<ArchiveEntry>> {
        info!("Reading archive {:?}", self.path);
        let file = File::open(&self.path)?;
        let mut archive = ZipArchive::new(file)?;

        let mut infos: HashMap<String, MefInfo> = HashMap::new();
        let mut documents: Vec<(String, String)> = Vec::new();

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            if !name.to_ascii_lowercase().ends_with(".xml") {
                continue;
            }

            let mut xml = String::new();
            entry.read_to_string(&mut xml)?;

            if file_name(&name) == MEF_INFO {
                match MefInfo::parse(&xml) {
                    Ok(info) => {
                        infos.insert(parent_dir(&name).to_string(), info);
                    }
                    Err(err) => warn!("Ignoring unreadable {}: {}", name, err),
                }
            } else {
                documents.push((name, xml));
            }
        }

        let mut entries = Vec::new();
        for (path, xml) in documents {
            let info = path
                .strip_suffix(MEF_METADATA)
                .and_then(|root| infos.get(root));
            let record = match info {
                Some(info) => {
                    let mut record = Record::new();
                    record.id = info.uuid.clone();
                    record.schema_id = info.schema.clone();
                    record
                }
                None if is_mef_record_dir(&path, &infos) => {
                    debug!("Skipping {} (not the main metadata document)", path);
                    continue;
                }
                None => Record::new(),
            };
            entries.push(ArchiveEntry { path, record, xml });
        }

        info!("Found {} metadata documents in {:?}", entries.len(), self.path);
        Ok(entries)
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Directory part of `path`, with its trailing slash.
fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..=index],
        None => "",
    }
}

/// Other XML files of a MEF record directory (alternative formats, attachments).
fn is_mef_record_dir(path: &str, infos: &HashMap<String, MefInfo>) -> bool {
    infos
        .keys()
        .any(|root| !root.is_empty() && path.starts_with(root.as_str()))
}
