use std::{path::Path, str::FromStr};

use crate::{error::Error, reference::LiteratureRef};

/// Output document format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Html,
}

impl FromStr for Format {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Format::Text),
            "html" => Ok(Format::Html),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl Format {
    /// Render the whole document. `title` is only used by formats that have a heading.
    pub fn render(self, refs: &[LiteratureRef], title: &str) -> String {
        match self {
            Format::Text => refs.iter().map(|r| text_line(r) + "\n").collect(),
            Format::Html => html_document(refs, title),
        }
    }
}

/// `[SERIES DATE] TITLE by AUTHORS (Link: URL[, Code: URL])`
pub fn text_line(r: &LiteratureRef) -> String {
    let mut out = format!(
        "[{} {}] {} by {} (Link: {}",
        r.series(),
        r.date(),
        r.title(),
        r.authors().join(", "),
        r.link()
    );
    if let Some(code) = r.code() {
        out.push_str(&format!(", Code: {code}"));
    }
    out.push(')');
    out
}

// NOTE: Fields are interpolated as-is, without HTML escaping.
fn html_item(r: &LiteratureRef) -> String {
    let mut out = format!(
        "<strong>[{} {}] <em>{}</em></strong><br><ul><li>Authors: {}</li><li><a href='{}'>Link</a>",
        r.series(),
        r.date(),
        r.title(),
        r.authors().join(", "),
        r.link()
    );
    if let Some(code) = r.code() {
        out.push_str(&format!(", <a href='{code}'>Code</a>"));
    }
    out.push_str("</ul>");
    out
}

fn html_document(refs: &[LiteratureRef], title: &str) -> String {
    let mut out = String::from("<!DOCTYPE html>\n");
    out.push_str(&format!("<html><head><title>{title}</title></head>\n"));
    out.push_str("<body>\n");
    out.push_str(&format!("<h2>{title}</h2>\n"));
    out.push_str("<ul>\n");
    for r in refs {
        out.push_str(&format!("<li>{}</li>\n", html_item(r)));
    }
    out.push_str("</ul>\n</body>\n</html>\n");
    out
}

/// Derive a display title from a bibliography path: `my-reading-list.bib` → `My Reading List`.
pub fn title_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().replace('-', " "))
        .unwrap_or_default();
    title_case(&stem)
}

/// Upper-case every cased letter that follows an uncased character, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_lowercase() || c.is_uppercase();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn study(code: Option<&str>) -> LiteratureRef {
        LiteratureRef::new(
            2022,
            "OSDI",
            "A Study",
            vec!["Bob Smith".into(), "Amy Lee".into()],
            "http://x",
            code.map(str::to_string),
        )
    }

    #[test]
    fn text_line_without_code() {
        assert_eq!(
            text_line(&study(None)),
            "[OSDI 2022] A Study by Bob Smith, Amy Lee (Link: http://x)"
        );
    }

    #[test]
    fn text_line_with_code() {
        assert_eq!(
            text_line(&study(Some("http://c"))),
            "[OSDI 2022] A Study by Bob Smith, Amy Lee (Link: http://x, Code: http://c)"
        );
    }

    #[test]
    fn text_document_is_one_line_per_record() {
        let doc = Format::Text.render(&[study(None), study(Some("http://c"))], "ignored");
        assert_eq!(doc.lines().count(), 2);
        assert!(doc.ends_with('\n'));
        assert!(!doc.contains("ignored"));
    }

    #[test]
    fn empty_text_document() {
        assert_eq!(Format::Text.render(&[], "T"), "");
    }

    #[test]
    fn html_document_layout() {
        let doc = Format::Html.render(&[study(None)], "Reading List");
        let expected = "<!DOCTYPE html>\n\
            <html><head><title>Reading List</title></head>\n\
            <body>\n\
            <h2>Reading List</h2>\n\
            <ul>\n\
            <li><strong>[OSDI 2022] <em>A Study</em></strong><br><ul><li>Authors: Bob Smith, Amy Lee</li><li><a href='http://x'>Link</a></ul></li>\n\
            </ul>\n</body>\n</html>\n";
        assert_eq!(doc, expected);
    }

    #[test]
    fn html_code_anchor_only_when_present() {
        let without = Format::Html.render(&[study(None)], "T");
        assert!(!without.contains("Code"));
        let with = Format::Html.render(&[study(Some("http://c"))], "T");
        assert!(with.contains(", <a href='http://c'>Code</a>"));
    }

    #[test]
    fn html_accepts_arbitrary_title() {
        let doc = Format::Html.render(&[], "Systems: Papers & Notes");
        assert!(doc.contains("<title>Systems: Papers & Notes</title>"));
        assert!(doc.contains("<h2>Systems: Papers & Notes</h2>"));
        assert!(doc.contains("<ul>\n</ul>"));
    }

    #[test]
    fn parses_known_formats() {
        assert_eq!("text".parse::<Format>().expect("text"), Format::Text);
        assert_eq!("html".parse::<Format>().expect("html"), Format::Html);
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "markdown".parse::<Format>().unwrap_err();
        assert!(matches!(&err, Error::UnsupportedFormat(f) if f == "markdown"));
        assert_eq!(err.to_string(), "unsupported format: markdown");
        assert!("HTML".parse::<Format>().is_err());
    }

    #[test]
    fn title_from_kebab_case_stem() {
        assert_eq!(title_from_path(Path::new("lists/reading-list.bib")), "Reading List");
        assert_eq!(title_from_path(Path::new("OS-papers.bib")), "Os Papers");
        assert_eq!(title_from_path(Path::new("ml-2024-picks.bib")), "Ml 2024 Picks");
        assert_eq!(title_from_path(Path::new("it's-fine")), "It'S Fine");
        assert_eq!(title_from_path(Path::new("中a-list.bib")), "中A List");
    }
}
