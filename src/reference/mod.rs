use std::{cmp::Ordering, collections::HashSet};

use crate::{
    entry::RawEntry,
    error::{Error, Result},
    latex,
};

pub mod authors;
pub mod series;

/// A normalised literature reference, ready to be listed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LiteratureRef {
    date: i64,
    series: String,
    title: String,
    authors: Vec<String>,
    link: String,
    code: Option<String>,
}

impl LiteratureRef {
    pub fn new(
        date: i64,
        series: impl Into<String>,
        title: impl Into<String>,
        authors: Vec<String>,
        link: impl Into<String>,
        code: Option<String>,
    ) -> Self {
        LiteratureRef {
            date,
            series: series.into(),
            title: title.into(),
            authors,
            link: link.into(),
            code,
        }
    }

    /// Normalise one raw entry. Fails if a required field is missing or the series cannot be
    /// resolved.
    pub fn from_entry(entry: &RawEntry) -> Result<Self> {
        let date = year_of(entry)?;
        let series = series::series_of(entry)?;
        let title = latex::to_text(required(entry, "title")?);
        let authors = authors::authors_of(entry);
        let link = required(entry, "url")?.to_string();
        let code = entry
            .get("code")
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        log::debug!("normalised `{}` as [{series} {date}] {title}", entry.key);
        Ok(LiteratureRef::new(date, series, title, authors, link, code))
    }

    pub fn date(&self) -> i64 {
        self.date
    }

    pub fn series(&self) -> &str {
        &self.series
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

fn required<'e>(entry: &'e RawEntry, field: &'static str) -> Result<&'e str> {
    entry.get(field).ok_or_else(|| Error::MissingField {
        field,
        entry: Box::new(entry.clone()),
    })
}

/// A missing year is treated as 0.
fn year_of(entry: &RawEntry) -> Result<i64> {
    let Some(year) = entry.get("year") else {
        return Ok(0);
    };
    year.trim().parse().map_err(|_| Error::InvalidYear {
        value: year.to_string(),
        entry: Box::new(entry.clone()),
    })
}

/// Reading-list order: newest first, then by series, then by title.
pub fn reading_order(a: &LiteratureRef, b: &LiteratureRef) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| a.series.cmp(&b.series))
        .then_with(|| a.title.cmp(&b.title))
}

/// Sort by [`reading_order`] and drop exact duplicates, keeping the first occurrence.
pub fn sort_and_dedup(mut refs: Vec<LiteratureRef>) -> Vec<LiteratureRef> {
    refs.sort_by(reading_order);
    let mut seen = HashSet::new();
    refs.retain(|r| seen.insert(r.clone()));
    refs
}
