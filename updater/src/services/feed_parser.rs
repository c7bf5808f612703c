//! Parser for the central bank daily rate feed.
//!
//! The document is a `ValCurs` root holding one `Valute` element per
//! currency. Only `CharCode` and `Value` are read; `Value` uses a decimal
//! comma. Any bad entry fails the whole parse.

use serde::Deserialize;
use shared::{RateError, RateSnapshot};

#[derive(Debug, Deserialize)]
struct ValCurs {
    #[serde(rename = "Valute", default)]
    valutes: Vec<Valute>,
}

#[derive(Debug, Deserialize)]
struct Valute {
    #[serde(rename = "CharCode")]
    char_code: String,
    #[serde(rename = "Value")]
    value: String,
}

pub fn parse(document: &str) -> Result<RateSnapshot, RateError> {
    let feed: ValCurs = quick_xml::de::from_str(document)
        .map_err(|e| RateError::Parse(format!("malformed feed document: {}", e)))?;

    let mut snapshot = RateSnapshot::new();
    for (index, valute) in feed.valutes.into_iter().enumerate() {
        let code = valute.char_code.trim();
        if code.is_empty() {
            return Err(RateError::Parse(format!("entry {} has an empty CharCode", index)));
        }

        let rate = parse_decimal_comma(&valute.value)
            .ok_or_else(|| RateError::Parse(format!("invalid Value {:?} for {}", valute.value, code)))?;

        snapshot.insert(code, rate);
    }

    Ok(snapshot)
}

/// `"90,5"` -> `90.5`; only finite positive numbers are accepted.
fn parse_decimal_comma(text: &str) -> Option<f64> {
    let rate: f64 = text.trim().replace(',', ".").parse().ok()?;
    (rate.is_finite() && rate > 0.0).then_some(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAILY_FEED: &str = r#"<?xml version="1.0" encoding="windows-1251"?>
<ValCurs Date="09.03.2024" name="Foreign Currency Market">
    <Valute ID="R01235">
        <NumCode>840</NumCode>
        <CharCode>USD</CharCode>
        <Nominal>1</Nominal>
        <Name>Доллар США</Name>
        <Value>90,7493</Value>
        <VunitRate>90,7493</VunitRate>
    </Valute>
    <Valute ID="R01239">
        <NumCode>978</NumCode>
        <CharCode>EUR</CharCode>
        <Nominal>1</Nominal>
        <Name>Евро</Name>
        <Value>99,1146</Value>
        <VunitRate>99,1146</VunitRate>
    </Valute>
    <Valute ID="R01820">
        <NumCode>392</NumCode>
        <CharCode>JPY</CharCode>
        <Nominal>100</Nominal>
        <Name>Японских иен</Name>
        <Value>61,5406</Value>
        <VunitRate>0,615406</VunitRate>
    </Valute>
</ValCurs>"#;

    #[test]
    fn test_parse_daily_feed() {
        let snapshot = parse(DAILY_FEED).unwrap();

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.get("USD"), Some(90.7493));
        assert_eq!(snapshot.get("EUR"), Some(99.1146));
        // Value is taken as published, Nominal is not applied.
        assert_eq!(snapshot.get("JPY"), Some(61.5406));

        let codes: Vec<&str> = snapshot.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["USD", "EUR", "JPY"]);
    }

    #[test]
    fn test_parse_feed_without_entries() {
        let snapshot = parse(r#"<ValCurs Date="09.03.2024" name="Foreign Currency Market"></ValCurs>"#).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_missing_value_fails_whole_parse() {
        let document = "<ValCurs>\
            <Valute><CharCode>USD</CharCode><Value>90,5</Value></Valute>\
            <Valute><CharCode>EUR</CharCode></Valute>\
            </ValCurs>";

        assert!(matches!(parse(document), Err(RateError::Parse(_))));
    }

    #[test]
    fn test_missing_code_fails_whole_parse() {
        let document = "<ValCurs>\
            <Valute><Value>90,5</Value></Valute>\
            </ValCurs>";

        assert!(matches!(parse(document), Err(RateError::Parse(_))));
    }

    #[test]
    fn test_invalid_values_fail_whole_parse() {
        for value in ["abc", "0,0", "-1,5", "", "1,2,3"] {
            let document = format!(
                "<ValCurs>\
                 <Valute><CharCode>USD</CharCode><Value>90,5</Value></Valute>\
                 <Valute><CharCode>EUR</CharCode><Value>{}</Value></Valute>\
                 </ValCurs>",
                value
            );
            assert!(
                matches!(parse(&document), Err(RateError::Parse(_))),
                "expected parse error for value {:?}",
                value
            );
        }
    }

    #[test]
    fn test_malformed_document() {
        for document in [
            "<ValCurs><Valute><CharCode>USD</CharCode>",
            "<ValCurs><Valute></ValCurs>",
        ] {
            assert!(matches!(parse(document), Err(RateError::Parse(_))));
        }
    }

    #[test]
    fn test_parse_decimal_comma() {
        assert_eq!(parse_decimal_comma(" 12,3456 "), Some(12.3456));
        assert_eq!(parse_decimal_comma("7"), Some(7.0));
        assert_eq!(parse_decimal_comma("NaN"), None);
    }
}
