use crate::{
    entry::RawEntry,
    error::{Error, Result},
};

/// Short series names and the substrings that identify them inside a `booktitle`.
///
/// NOTE: Ordering is important here, as it signifies priority. If a booktitle matches the
/// patterns of two series, the first one to show up in this list wins.
pub static BOOKTITLE_PATTERN: &[(&str, &[&str])] = &[
    (
        "ASPLOS",
        &["Architectural Support for Programming Languages and Operating Systems"],
    ),
    ("FAST", &["File and Storage Technologies"]),
    ("OSDI", &["Operating Systems Design and Implementation", "OSDI"]),
    ("SOSP", &["Symposium on Operating Systems Principles"]),
    (
        "USENIX ATC",
        &[
            "Usenix Annual Technical Conference",
            "USENIX Annual Technical Conference",
        ],
    ),
    (
        "EuroSys",
        &["European Conference on Computer Systems", "EuroSys Conference"],
    ),
    ("PLDI", &["Programming Language Design and Implementation"]),
    ("MICRO", &["International Symposium on Microarchitecture"]),
    ("ICCAD", &["International Conference on Computer-Aided Design"]),
    (
        "VEE",
        &["International Conference on Virtual Execution Environments"],
    ),
    (
        "MobiSys",
        &["International Conference on Mobile Systems, Applications, and Services"],
    ),
    (
        "CGO",
        &["International Symposium on Code Generation and Optimization"],
    ),
];

/// Find the series whose pattern occurs in `booktitle`, scanning `table` in order.
pub fn match_booktitle(
    table: &[(&'static str, &[&str])],
    booktitle: &str,
) -> Result<&'static str> {
    for &(series, alternatives) in table {
        if alternatives.is_empty() {
            return Err(Error::InvalidPattern(series));
        }
        if alternatives.iter().any(|alt| booktitle.contains(alt)) {
            return Ok(series);
        }
    }
    Err(Error::UnknownBooktitle(booktitle.to_string()))
}

/// Resolve the series label of `entry`.
pub fn series_of(entry: &RawEntry) -> Result<String> {
    if let Some(booktitle) = entry.get("booktitle") {
        return match_booktitle(BOOKTITLE_PATTERN, booktitle).map(str::to_string);
    }
    if entry.contains("journal") {
        return Err(Error::NotImplemented(entry.key.clone()));
    }
    match entry.get("archiveprefix") {
        Some("arXiv") => Ok("arXiv".to_string()),
        Some(other) => Err(Error::UnknownArchivePrefix(other.to_string())),
        None => Err(Error::UnknownEntryType(Box::new(entry.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_booktitle(booktitle: &str) -> RawEntry {
        RawEntry::new("k", "inproceedings").with("booktitle", booktitle)
    }

    #[test]
    fn every_alternative_resolves_to_its_series() {
        for (series, alternatives) in BOOKTITLE_PATTERN {
            for alt in *alternatives {
                let booktitle = format!("Proceedings of the 1st {alt} (X '24)");
                let got = series_of(&with_booktitle(&booktitle)).expect("resolve");
                assert_eq!(got, *series, "booktitle {booktitle:?}");
            }
        }
    }

    #[test]
    fn short_osdi_booktitle() {
        let got = series_of(&with_booktitle("Proceedings of OSDI '22")).expect("resolve");
        assert_eq!(got, "OSDI");
    }

    #[test]
    fn usenix_atc_both_spellings() {
        for bt in [
            "2023 USENIX Annual Technical Conference (USENIX ATC 23)",
            "Proceedings of the 2019 Usenix Annual Technical Conference",
        ] {
            assert_eq!(series_of(&with_booktitle(bt)).expect("resolve"), "USENIX ATC");
        }
    }

    #[test]
    fn first_match_wins() {
        // Mentions both SOSP and ASPLOS; ASPLOS is listed first.
        let bt = "Architectural Support for Programming Languages and Operating Systems \
                  co-located with the Symposium on Operating Systems Principles";
        assert_eq!(series_of(&with_booktitle(bt)).expect("resolve"), "ASPLOS");
    }

    #[test]
    fn unknown_booktitle_names_value() {
        let err = series_of(&with_booktitle("Workshop on Nothing")).unwrap_err();
        assert!(matches!(&err, Error::UnknownBooktitle(bt) if bt == "Workshop on Nothing"));
        assert!(err.to_string().contains("Workshop on Nothing"));
    }

    #[test]
    fn match_is_case_sensitive() {
        let err = series_of(&with_booktitle("file and storage technologies")).unwrap_err();
        assert!(matches!(err, Error::UnknownBooktitle(_)));
    }

    #[test]
    fn empty_pattern_is_a_configuration_error() {
        let table: &[(&str, &[&str])] = &[("BROKEN", &[]), ("FAST", &["File and Storage"])];
        let err = match_booktitle(table, "File and Storage Technologies").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern("BROKEN")));
    }

    #[test]
    fn booktitle_takes_precedence_over_journal() {
        let e = with_booktitle("File and Storage Technologies").with("journal", "J");
        assert_eq!(series_of(&e).expect("resolve"), "FAST");
    }

    #[test]
    fn journal_is_not_implemented() {
        let e = RawEntry::new("j1", "article").with("journal", "ACM TOCS");
        assert!(matches!(series_of(&e), Err(Error::NotImplemented(key)) if key == "j1"));
    }

    #[test]
    fn journal_takes_precedence_over_archive_prefix() {
        let e = RawEntry::new("j1", "article")
            .with("journal", "CoRR")
            .with("archiveprefix", "arXiv");
        assert!(matches!(series_of(&e), Err(Error::NotImplemented(_))));
    }

    #[test]
    fn arxiv_prefix() {
        let e = RawEntry::new("a", "misc").with("archiveprefix", "arXiv");
        assert_eq!(series_of(&e).expect("resolve"), "arXiv");
    }

    #[test]
    fn other_archive_prefix_fails() {
        let e = RawEntry::new("a", "misc").with("archiveprefix", "HAL");
        assert!(matches!(series_of(&e), Err(Error::UnknownArchivePrefix(p)) if p == "HAL"));
    }

    #[test]
    fn no_venue_fields_is_unknown_entry_type() {
        let e = RawEntry::new("b", "book").with("title", "T");
        assert!(matches!(series_of(&e), Err(Error::UnknownEntryType(_))));
    }
}
