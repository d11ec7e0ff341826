//! Search-by-field filter expressions for the Legistar matters endpoint.
//!
//! Every field maps to a substring predicate over one matter attribute:
//!
//! | Field     | Attribute               |
//! |-----------|-------------------------|
//! | Law #     | `MatterEnactmentNumber` |
//! | File #    | `MatterFile`            |
//! | Title     | `MatterTitle`           |
//! | Name      | `MatterName`            |
//! | Summary   | `MatterEXText5`         |
//! | Committee | `MatterBodyName`        |
//!
//! The query is interpolated as-is. Legistar rejects malformed expressions
//! upstream and the proxy reports that like any other upstream failure.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The matter attribute a search runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchField {
    #[default]
    LawNumber,
    FileNumber,
    Title,
    Name,
    Summary,
    Committee,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "unknown search field {0:?} (expected one of: law, file, title, name, summary, committee)"
)]
pub struct UnknownSearchField(pub String);

impl SearchField {
    pub const ALL: [SearchField; 6] = [
        SearchField::LawNumber,
        SearchField::FileNumber,
        SearchField::Title,
        SearchField::Name,
        SearchField::Summary,
        SearchField::Committee,
    ];

    /// Label shown in the field picker.
    pub fn label(self) -> &'static str {
        match self {
            SearchField::LawNumber => "Law #",
            SearchField::FileNumber => "File #",
            SearchField::Title => "Title",
            SearchField::Name => "Name",
            SearchField::Summary => "Summary",
            SearchField::Committee => "Committee",
        }
    }

    /// Upstream attribute the predicate runs over.
    pub fn attribute(self) -> &'static str {
        match self {
            SearchField::LawNumber => "MatterEnactmentNumber",
            SearchField::FileNumber => "MatterFile",
            SearchField::Title => "MatterTitle",
            SearchField::Name => "MatterName",
            SearchField::Summary => "MatterEXText5",
            SearchField::Committee => "MatterBodyName",
        }
    }

    /// Build the predicate for an already-trimmed, non-blank query.
    pub fn predicate(self, query: &str) -> String {
        format!("substringof('{}',{})", query, self.attribute())
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SearchField {
    type Err = UnknownSearchField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let field = match key.as_str() {
            "law" | "law #" | "law-number" | "enactment" => SearchField::LawNumber,
            "file" | "file #" | "file-number" => SearchField::FileNumber,
            "title" => SearchField::Title,
            "name" => SearchField::Name,
            "summary" => SearchField::Summary,
            "committee" | "body" => SearchField::Committee,
            _ => return Err(UnknownSearchField(s.to_string())),
        };
        Ok(field)
    }
}

/// Build the upstream `$filter` expression for a search.
///
/// Returns `None` for a blank query; callers treat that as "no search".
pub fn build_filter(field: SearchField, query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    Some(field.predicate(query))
}

/// Exact lookup of a single matter by id.
pub fn matter_id_filter(matter_id: i64) -> String {
    format!("MatterId eq {matter_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicate_per_field() {
        let cases = [
            (
                SearchField::LawNumber,
                "2024/045",
                "substringof('2024/045',MatterEnactmentNumber)",
            ),
            (
                SearchField::FileNumber,
                "Int 0123-2024",
                "substringof('Int 0123-2024',MatterFile)",
            ),
            (
                SearchField::Title,
                "O'Brien",
                "substringof('O'Brien',MatterTitle)",
            ),
            (
                SearchField::Name,
                "co-naming",
                "substringof('co-naming',MatterName)",
            ),
            (
                SearchField::Summary,
                "rename a park",
                "substringof('rename a park',MatterEXText5)",
            ),
            (
                SearchField::Committee,
                "Parks",
                "substringof('Parks',MatterBodyName)",
            ),
        ];
        for (field, query, expected) in cases {
            assert_eq!(
                build_filter(field, query).as_deref(),
                Some(expected),
                "field {field}"
            );
        }
    }

    #[test]
    fn query_is_trimmed() {
        assert_eq!(
            build_filter(SearchField::Title, "  budget \t").as_deref(),
            Some("substringof('budget',MatterTitle)")
        );
    }

    #[test]
    fn blank_query_builds_nothing() {
        assert_eq!(build_filter(SearchField::Title, ""), None);
        assert_eq!(build_filter(SearchField::Committee, "   "), None);
    }

    #[test]
    fn default_field_is_law_number() {
        assert_eq!(SearchField::default(), SearchField::LawNumber);
    }

    #[test]
    fn parse_field_names() {
        assert_eq!("law".parse(), Ok(SearchField::LawNumber));
        assert_eq!("Law #".parse(), Ok(SearchField::LawNumber));
        assert_eq!("FILE".parse(), Ok(SearchField::FileNumber));
        assert_eq!(" title ".parse(), Ok(SearchField::Title));
        assert_eq!("Committee".parse(), Ok(SearchField::Committee));
        assert_eq!(
            "sponsor".parse::<SearchField>(),
            Err(UnknownSearchField("sponsor".into()))
        );
    }

    #[test]
    fn labels_round_trip_through_parse() {
        for field in SearchField::ALL {
            assert_eq!(field.label().parse(), Ok(field));
        }
    }

    #[test]
    fn id_filter() {
        assert_eq!(matter_id_filter(77463), "MatterId eq 77463");
    }
}
