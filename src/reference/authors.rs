use crate::{entry::RawEntry, latex};

/// Extract display names from the `author` field, in source order.
pub fn authors_of(entry: &RawEntry) -> Vec<String> {
    entry
        .get("author")
        .unwrap_or_default()
        .split(" and ")
        .map(|name| reorder_name(&latex::to_text(name.trim())))
        .collect()
}

/// Turn `Last, First` into `First Last`. Anything else is returned unchanged.
pub fn reorder_name(name: &str) -> String {
    let parts: Vec<&str> = name.split(", ").collect();
    match parts.as_slice() {
        [last, first] => format!("{first} {last}"),
        _ => name.to_string(),
    }
}
