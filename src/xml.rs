//! # XML element tree
//!
//! Metadata records are small (a few hundred kilobytes at most) and every field is
//! looked up by walking the document in several independent passes, so the record
//! is read once with `quick-xml` into a minimal owned tree and queried from there.
//!
//! Lookups use *qualified* element names (`gmd:title`, not `title`) and search all
//! descendants in document order. A lookup step may list alternatives separated by
//! `|`; the first alternative that matches anything wins.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::{HarvestError, Result};

/// Element holding the free-text value of most ISO 19139 / 19115-3 properties.
pub const CHARACTER_STRING: &str = "gco:CharacterString|gmx:Anchor|gcx:Anchor";

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Parses a whole document and returns its root element.
    pub fn parse(xml: &str) -> Result<Element> {
        debug!("Parsing XML document of length {}", xml.len());
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => stack.push(Element::from_start(&e)?),
                Event::Empty(e) => {
                    let element = Element::from_start(&e)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    if let Some(element) = stack.pop() {
                        attach(&mut stack, &mut root, element);
                    }
                }
                Event::Text(e) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Text(e.unescape()?.into_owned()));
                    }
                }
                Event::CData(e) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                        parent.children.push(Node::Text(text));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            debug!("Document ended with {} unclosed elements", stack.len());
            return Err(HarvestError::MissingRoot);
        }
        root.ok_or(HarvestError::MissingRoot)
    }

    fn from_start(start: &BytesStart) -> Result<Element> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Element {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// Raw attribute value, as written in the document.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Trimmed attribute value; blank values count as absent.
    pub fn attribute_value(&self, name: &str) -> Option<String> {
        self.attribute(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// All descendants matching `names` (`a|b` alternatives), in document order.
    pub fn find_all(&self, names: &str) -> Vec<&Element> {
        for name in names.split('|') {
            let mut found = Vec::new();
            self.collect_descendants(name.trim(), &mut found);
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }

    pub fn find(&self, names: &str) -> Option<&Element> {
        self.find_all(names).into_iter().next()
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in self.elements() {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }

    /// Follows `path` taking the first match at every step.
    pub fn select(&self, path: &[&str]) -> Option<&Element> {
        let mut current = self;
        for step in path {
            current = current.find(step)?;
        }
        Some(current)
    }

    /// Follows `path` expanding every match at every step.
    pub fn select_all(&self, path: &[&str]) -> Vec<&Element> {
        let mut current = vec![self];
        for step in path {
            current = current
                .into_iter()
                .flat_map(|element| element.find_all(step))
                .collect();
            if current.is_empty() {
                break;
            }
        }
        current
    }

    /// Concatenated text of the whole subtree, trimmed; blank counts as absent.
    pub fn text(&self) -> Option<String> {
        let mut buffer = String::new();
        self.collect_text(&mut buffer);
        let trimmed = buffer.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn collect_text(&self, buffer: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => buffer.push_str(text),
                Node::Element(element) => element.collect_text(buffer),
            }
        }
    }

    /// Text of the free-text wrapper element below this one.
    pub fn character_string(&self) -> Option<String> {
        self.find(CHARACTER_STRING).and_then(Element::text)
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gmd:MD_Metadata xmlns:gmd="http://www.isotc211.org/2005/gmd" xmlns:gco="http://www.isotc211.org/2005/gco">
  <gmd:fileIdentifier>
    <gco:CharacterString>  abc-123 </gco:CharacterString>
  </gmd:fileIdentifier>
  <gmd:contact>
    <gmd:CI_ResponsibleParty>
      <gmd:role><gmd:CI_RoleCode codeListValue=" owner " codeList="x"/></gmd:role>
    </gmd:CI_ResponsibleParty>
  </gmd:contact>
  <gmd:contact>
    <gmd:CI_ResponsibleParty>
      <gmd:role><gmd:CI_RoleCode codeListValue=""/></gmd:role>
    </gmd:CI_ResponsibleParty>
  </gmd:contact>
  <gmd:abstract><gco:CharacterString><![CDATA[Fish & <chips>]]></gco:CharacterString></gmd:abstract>
  <gmd:title><gco:CharacterString>Reef &amp; lagoon</gco:CharacterString></gmd:title>
</gmd:MD_Metadata>"#;

    #[test]
    fn test_parse_and_lookup() {
        let root = Element::parse(SAMPLE).unwrap();
        assert_eq!(root.name(), "gmd:MD_Metadata");
        assert_eq!(root.local_name(), "MD_Metadata");

        let id = root.find("gmd:fileIdentifier").and_then(|e| e.character_string());
        assert_eq!(id.as_deref(), Some("abc-123"));

        let title = root.find("gmd:title").and_then(|e| e.character_string());
        assert_eq!(title.as_deref(), Some("Reef & lagoon"));

        let abstract_text = root.find("gmd:abstract").and_then(|e| e.text());
        assert_eq!(abstract_text.as_deref(), Some("Fish & <chips>"));
    }

    #[test]
    fn test_select_all_visits_every_branch() {
        let root = Element::parse(SAMPLE).unwrap();
        let roles = root.select_all(&["gmd:contact", "gmd:role", "gmd:CI_RoleCode"]);
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].attribute_value("codeListValue").as_deref(), Some("owner"));
        assert_eq!(roles[1].attribute_value("codeListValue"), None);
        assert_eq!(roles[1].attribute("codeListValue"), Some(""));
    }

    #[test]
    fn test_alternative_names() {
        let root = Element::parse(SAMPLE).unwrap();
        assert!(root.find("mcp:MD_DataIdentification|gmd:fileIdentifier").is_some());
        assert!(root.find("mcp:MD_DataIdentification").is_none());
        assert!(root.select(&["gmd:contact", "gmd:missing"]).is_none());
    }

    #[test]
    fn test_missing_root() {
        assert!(matches!(
            Element::parse("<?xml version=\"1.0\"?>"),
            Err(HarvestError::MissingRoot)
        ));
        assert!(Element::parse("<a><b></a>").is_err());
    }
}
