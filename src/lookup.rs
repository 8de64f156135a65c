//! Static lookup tables shared by every parser.
//!
//! Built once with [`LookupTables::new`] and passed around by reference; nothing in
//! here is mutated after construction.

use std::collections::HashMap;

/// ISO 19115 `CI_RoleCode` values and the heading used for them in documents.
const ROLE_LABELS: &[(&str, &str)] = &[
    ("resourceProvider", "Resource provider"),
    ("custodian", "Custodian"),
    ("owner", "Owner"),
    ("user", "User"),
    ("distributor", "Distributor"),
    ("originator", "Originator"),
    ("pointOfContact", "Point of contact"),
    ("principalInvestigator", "Principal investigator"),
    ("processor", "Processor"),
    ("publisher", "Publisher"),
    ("author", "Author"),
    ("coInvestigator", "Co-investigator"),
    ("licensor", "Licensor"),
    ("researchAssistant", "Research assistant"),
    ("ipOwner", "Intellectual property owner"),
    ("moralRightsOwner", "Moral rights owner"),
    ("metadataContact", "Metadata contact"),
];

/// ISO 639-2/T (terminology) code to ISO 639-1 code.
const TERMINOLOGY_LANGUAGES: &[(&str, &str)] = &[
    ("aar", "aa"), ("abk", "ab"), ("ave", "ae"), ("afr", "af"), ("aka", "ak"),
    ("amh", "am"), ("arg", "an"), ("ara", "ar"), ("asm", "as"), ("ava", "av"),
    ("aym", "ay"), ("aze", "az"), ("bak", "ba"), ("bel", "be"), ("bul", "bg"),
    ("bih", "bh"), ("bis", "bi"), ("bam", "bm"), ("ben", "bn"), ("bod", "bo"),
    ("bre", "br"), ("bos", "bs"), ("cat", "ca"), ("che", "ce"), ("cha", "ch"),
    ("cos", "co"), ("cre", "cr"), ("ces", "cs"), ("chu", "cu"), ("chv", "cv"),
    ("cym", "cy"), ("dan", "da"), ("deu", "de"), ("div", "dv"), ("dzo", "dz"),
    ("ewe", "ee"), ("ell", "el"), ("eng", "en"), ("epo", "eo"), ("spa", "es"),
    ("est", "et"), ("eus", "eu"), ("fas", "fa"), ("ful", "ff"), ("fin", "fi"),
    ("fij", "fj"), ("fao", "fo"), ("fra", "fr"), ("fry", "fy"), ("gle", "ga"),
    ("gla", "gd"), ("glg", "gl"), ("grn", "gn"), ("guj", "gu"), ("glv", "gv"),
    ("hau", "ha"), ("heb", "he"), ("hin", "hi"), ("hmo", "ho"), ("hrv", "hr"),
    ("hat", "ht"), ("hun", "hu"), ("hye", "hy"), ("her", "hz"), ("ina", "ia"),
    ("ind", "id"), ("ile", "ie"), ("ibo", "ig"), ("iii", "ii"), ("ipk", "ik"),
    ("ido", "io"), ("isl", "is"), ("ita", "it"), ("iku", "iu"), ("jpn", "ja"),
    ("jav", "jv"), ("kat", "ka"), ("kon", "kg"), ("kik", "ki"), ("kua", "kj"),
    ("kaz", "kk"), ("kal", "kl"), ("khm", "km"), ("kan", "kn"), ("kor", "ko"),
    ("kau", "kr"), ("kas", "ks"), ("kur", "ku"), ("kom", "kv"), ("cor", "kw"),
    ("kir", "ky"), ("lat", "la"), ("ltz", "lb"), ("lug", "lg"), ("lim", "li"),
    ("lin", "ln"), ("lao", "lo"), ("lit", "lt"), ("lub", "lu"), ("lav", "lv"),
    ("mlg", "mg"), ("mah", "mh"), ("mri", "mi"), ("mkd", "mk"), ("mal", "ml"),
    ("mon", "mn"), ("mar", "mr"), ("msa", "ms"), ("mlt", "mt"), ("mya", "my"),
    ("nau", "na"), ("nob", "nb"), ("nde", "nd"), ("nep", "ne"), ("ndo", "ng"),
    ("nld", "nl"), ("nno", "nn"), ("nor", "no"), ("nbl", "nr"), ("nav", "nv"),
    ("nya", "ny"), ("oci", "oc"), ("oji", "oj"), ("orm", "om"), ("ori", "or"),
    ("oss", "os"), ("pan", "pa"), ("pli", "pi"), ("pol", "pl"), ("pus", "ps"),
    ("por", "pt"), ("que", "qu"), ("roh", "rm"), ("run", "rn"), ("ron", "ro"),
    ("rus", "ru"), ("kin", "rw"), ("san", "sa"), ("srd", "sc"), ("snd", "sd"),
    ("sme", "se"), ("sag", "sg"), ("sin", "si"), ("slk", "sk"), ("slv", "sl"),
    ("smo", "sm"), ("sna", "sn"), ("som", "so"), ("sqi", "sq"), ("srp", "sr"),
    ("ssw", "ss"), ("sot", "st"), ("sun", "su"), ("swe", "sv"), ("swa", "sw"),
    ("tam", "ta"), ("tel", "te"), ("tgk", "tg"), ("tha", "th"), ("tir", "ti"),
    ("tuk", "tk"), ("tgl", "tl"), ("tsn", "tn"), ("ton", "to"), ("tur", "tr"),
    ("tso", "ts"), ("tat", "tt"), ("twi", "tw"), ("tah", "ty"), ("uig", "ug"),
    ("ukr", "uk"), ("urd", "ur"), ("uzb", "uz"), ("ven", "ve"), ("vie", "vi"),
    ("vol", "vo"), ("wln", "wa"), ("wol", "wo"), ("xho", "xh"), ("yid", "yi"),
    ("yor", "yo"), ("zha", "za"), ("zho", "zh"), ("zul", "zu"),
];

/// ISO 639-2/B (bibliographic) codes that differ from the terminology ones.
/// GeoNetwork writes these for a few European languages (`fre`, `ger`).
const BIBLIOGRAPHIC_LANGUAGES: &[(&str, &str)] = &[
    ("alb", "sq"), ("arm", "hy"), ("baq", "eu"), ("bur", "my"), ("chi", "zh"),
    ("cze", "cs"), ("dut", "nl"), ("fre", "fr"), ("geo", "ka"), ("ger", "de"),
    ("gre", "el"), ("ice", "is"), ("mac", "mk"), ("mao", "mi"), ("may", "ms"),
    ("per", "fa"), ("rum", "ro"), ("slo", "sk"), ("tib", "bo"), ("wel", "cy"),
];

#[derive(Debug, Clone)]
pub struct LookupTables {
    role_labels: HashMap<&'static str, &'static str>,
    languages: HashMap<&'static str, &'static str>,
}

impl Default for LookupTables {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupTables {
    pub fn new() -> Self {
        Self {
            role_labels: ROLE_LABELS.iter().copied().collect(),
            languages: TERMINOLOGY_LANGUAGES
                .iter()
                .chain(BIBLIOGRAPHIC_LANGUAGES)
                .copied()
                .collect(),
        }
    }

    pub fn role_label(&self, role: &str) -> Option<&'static str> {
        self.role_labels.get(role).copied()
    }

    /// Two letter language code for a catalog language value.
    ///
    /// Two letter values are kept as they are, three letter values go through the
    /// ISO 639-2 table, anything else is dropped.
    pub fn language_code(&self, value: &str) -> Option<String> {
        let value = value.trim();
        match value.chars().count() {
            2 => Some(value.to_string()),
            3 => self
                .languages
                .get(value.to_ascii_lowercase().as_str())
                .map(|code| code.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels() {
        let tables = LookupTables::new();
        assert_eq!(tables.role_label("pointOfContact"), Some("Point of contact"));
        assert_eq!(tables.role_label("ipOwner"), Some("Intellectual property owner"));
        assert_eq!(tables.role_label("UNKNOWN"), None);
    }

    #[test]
    fn test_language_codes() {
        let tables = LookupTables::new();
        assert_eq!(tables.language_code("eng").as_deref(), Some("en"));
        assert_eq!(tables.language_code("fra").as_deref(), Some("fr"));
        assert_eq!(tables.language_code("fre").as_deref(), Some("fr"));
        assert_eq!(tables.language_code("en").as_deref(), Some("en"));
        assert_eq!(tables.language_code("xyz"), None);
        assert_eq!(tables.language_code("english"), None);
        assert_eq!(tables.language_code(""), None);
    }
}
