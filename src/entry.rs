use std::{collections::BTreeMap, fmt};

use anyhow::anyhow;
use biblatex::{Bibliography, ChunksExt, Entry};

/// One bibliography entry as it appears in the source file, reduced to plain field strings.
///
/// Field names are always lowercase. Values are the parser's verbatim rendering of the field,
/// so they may still carry LaTeX markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawEntry {
    pub key: String,
    pub kind: String,
    fields: BTreeMap<String, String>,
}

impl RawEntry {
    pub fn new(key: impl Into<String>, kind: impl Into<String>) -> Self {
        RawEntry {
            key: key.into(),
            kind: kind.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.to_lowercase(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}

impl From<&Entry> for RawEntry {
    fn from(entry: &Entry) -> Self {
        entry.fields.iter().fold(
            RawEntry::new(entry.key.clone(), entry.entry_type.to_string()),
            |raw, (name, chunks)| raw.with(name, chunks.format_verbatim()),
        )
    }
}

impl fmt::Display for RawEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}{{{}", self.kind, self.key)?;
        for (name, value) in &self.fields {
            write!(f, ", {name} = {{{value}}}")?;
        }
        f.write_str("}")
    }
}

/// Parse BibTeX/BibLaTeX source into raw entries, keeping file order.
pub fn parse_bibliography(src: &str) -> anyhow::Result<Vec<RawEntry>> {
    let bib = Bibliography::parse(src).map_err(|e| anyhow!("failed to parse bibliography: {e}"))?;
    let entries: Vec<RawEntry> = bib.iter().map(RawEntry::from).collect();
    log::info!("parsed {} bibliography entries", entries.len());
    Ok(entries)
}
