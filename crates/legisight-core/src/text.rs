//! Display helpers: HTML entity decoding and upstream date handling.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Decode the HTML entities Legistar leaves in matter titles.
///
/// Handles `&amp; &lt; &gt; &quot; &apos; &nbsp;` and numeric references
/// (`&#39;`, `&#x2019;`). Anything else is left untouched.
pub fn decode_html_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        let decoded = tail
            .find(';')
            .filter(|&semi| semi > 1 && semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Parse a Legistar timestamp.
///
/// Legistar emits local wall-clock times without an offset
/// (`2024-03-05T00:00:00`, sometimes with fractional seconds). RFC 3339 and
/// bare dates are accepted as well; offsets are dropped, keeping the wall-clock
/// date the record was published with.
pub fn parse_upstream_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `March 5, 2024`.
pub fn format_display_date(dt: NaiveDateTime) -> String {
    dt.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_entities() {
        assert_eq!(
            decode_html_entities("Parks &amp; Recreation &lt;Local Law&gt; &quot;Q&quot;"),
            "Parks & Recreation <Local Law> \"Q\""
        );
        assert_eq!(decode_html_entities("O&apos;Brien"), "O'Brien");
    }

    #[test]
    fn decodes_numeric_entities() {
        assert_eq!(decode_html_entities("O&#39;Brien"), "O'Brien");
        assert_eq!(decode_html_entities("Council&#x2019;s"), "Council\u{2019}s");
    }

    #[test]
    fn leaves_unknown_and_bare_ampersands() {
        assert_eq!(decode_html_entities("AT&T"), "AT&T");
        assert_eq!(decode_html_entities("&bogus; x"), "&bogus; x");
        assert_eq!(decode_html_entities("a & b; c"), "a & b; c");
        assert_eq!(decode_html_entities("trailing &"), "trailing &");
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(decode_html_entities("A Local Law"), "A Local Law");
        assert_eq!(decode_html_entities(""), "");
    }

    #[test]
    fn parses_legistar_timestamp() {
        let dt = parse_upstream_date("2024-03-05T00:00:00").unwrap();
        assert_eq!(format_display_date(dt), "March 5, 2024");

        let dt = parse_upstream_date("2023-12-31T16:30:00.25").unwrap();
        assert_eq!(format_display_date(dt), "December 31, 2023");
    }

    #[test]
    fn parses_rfc3339_and_bare_dates() {
        let dt = parse_upstream_date("2024-11-05T10:00:00Z").unwrap();
        assert_eq!(format_display_date(dt), "November 5, 2024");

        let dt = parse_upstream_date("2024-01-09").unwrap();
        assert_eq!(format_display_date(dt), "January 9, 2024");
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(parse_upstream_date("").is_none());
        assert!(parse_upstream_date("yesterday").is_none());
    }
}
