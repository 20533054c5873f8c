//! Country code helpers.
//!
//! Eurostat geo codes are ISO 3166-1 alpha-2 codes with two exceptions (`EL`
//! for Greece and `UK` for the United Kingdom), mixed with aggregate codes
//! for country groupings. Map layers downstream need alpha-3 codes and no
//! aggregates.

use std::collections::BTreeMap;

/// ISO 3166-1 alpha-2 / alpha-3 pairs for the geography covered by Eurostat
/// demographic and social exports.
const ISO_3166: &[(&str, &str)] = &[
    ("AD", "AND"),
    ("AL", "ALB"),
    ("AM", "ARM"),
    ("AT", "AUT"),
    ("AZ", "AZE"),
    ("BA", "BIH"),
    ("BE", "BEL"),
    ("BG", "BGR"),
    ("BY", "BLR"),
    ("CH", "CHE"),
    ("CY", "CYP"),
    ("CZ", "CZE"),
    ("DE", "DEU"),
    ("DK", "DNK"),
    ("EE", "EST"),
    ("ES", "ESP"),
    ("FI", "FIN"),
    ("FO", "FRO"),
    ("FR", "FRA"),
    ("GB", "GBR"),
    ("GE", "GEO"),
    ("GI", "GIB"),
    ("GR", "GRC"),
    ("HR", "HRV"),
    ("HU", "HUN"),
    ("IE", "IRL"),
    ("IS", "ISL"),
    ("IT", "ITA"),
    ("LI", "LIE"),
    ("LT", "LTU"),
    ("LU", "LUX"),
    ("LV", "LVA"),
    ("MC", "MCO"),
    ("MD", "MDA"),
    ("ME", "MNE"),
    ("MK", "MKD"),
    ("MT", "MLT"),
    ("NL", "NLD"),
    ("NO", "NOR"),
    ("PL", "POL"),
    ("PT", "PRT"),
    ("RO", "ROU"),
    ("RS", "SRB"),
    ("RU", "RUS"),
    ("SE", "SWE"),
    ("SI", "SVN"),
    ("SK", "SVK"),
    ("SM", "SMR"),
    ("TR", "TUR"),
    ("UA", "UKR"),
    ("VA", "VAT"),
];

/// Eurostat-specific alpha-2 codes.
const EUROSTAT_ALIASES: &[(&str, &str)] = &[("EL", "GRC"), ("UK", "GBR")];

/// Aggregate codes that do not follow the prefix rules below.
const NAMED_AGGREGATES: &[&str] = &["EA", "EEA", "EFTA", "EU", "FX"];

/// Countries left out of map-ready output even though they have an ISO code.
const MAP_EXCLUDED_COUNTRIES: &[&str] = &["SM"];

/// Looks up the alpha-3 code for an alpha-2 (or Eurostat alias) code.
///
/// # Examples
///
/// ```
/// use estat_model::iso2_to_iso3;
///
/// assert_eq!(iso2_to_iso3("IT"), Some("ITA"));
/// assert_eq!(iso2_to_iso3("EL"), Some("GRC"));
/// assert_eq!(iso2_to_iso3("EU27_2020"), None);
/// ```
pub fn iso2_to_iso3(code: &str) -> Option<&'static str> {
    let code = code.trim();
    ISO_3166
        .iter()
        .chain(EUROSTAT_ALIASES)
        .find(|(alpha2, _)| alpha2.eq_ignore_ascii_case(code))
        .map(|(_, alpha3)| *alpha3)
}

/// The full alpha-2 → alpha-3 table, aliases included.
pub fn iso3_mapping() -> BTreeMap<&'static str, &'static str> {
    ISO_3166
        .iter()
        .chain(EUROSTAT_ALIASES)
        .copied()
        .collect()
}

/// True for Eurostat aggregate geo codes (`EU27_2020`, `EA20`, `EEA31`,
/// `DE_TOT`, `EFTA`, ...).
pub fn is_aggregate_code(code: &str) -> bool {
    let code = code.trim().to_ascii_uppercase();
    if code.contains('_') || NAMED_AGGREGATES.contains(&code.as_str()) {
        return true;
    }
    ["EEA", "EU", "EA"].iter().any(|prefix| {
        code.strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
    })
}

/// True for geo codes that map-ready output leaves out: every aggregate plus
/// San Marino.
pub fn is_map_excluded(code: &str) -> bool {
    is_aggregate_code(code)
        || MAP_EXCLUDED_COUNTRIES
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(code.trim()))
}
