//! US state FIPS code table.
//!
//! Maps two-digit FIPS codes to postal abbreviations and full names for
//! the 50 states + DC. Codes outside the table (territories, water
//! features in some boundary files) resolve to `None`.

/// A single row of the state table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateFips {
    /// Two-digit FIPS code.
    pub code: &'static str,
    /// Two-letter postal abbreviation.
    pub abbr: &'static str,
    /// Full state name.
    pub name: &'static str,
}

const fn row(code: &'static str, abbr: &'static str, name: &'static str) -> StateFips {
    StateFips { code, abbr, name }
}

/// The 50 states + DC, ordered by FIPS code.
pub const STATES: &[StateFips] = &[
    row("01", "AL", "Alabama"),
    row("02", "AK", "Alaska"),
    row("04", "AZ", "Arizona"),
    row("05", "AR", "Arkansas"),
    row("06", "CA", "California"),
    row("08", "CO", "Colorado"),
    row("09", "CT", "Connecticut"),
    row("10", "DE", "Delaware"),
    row("11", "DC", "District of Columbia"),
    row("12", "FL", "Florida"),
    row("13", "GA", "Georgia"),
    row("15", "HI", "Hawaii"),
    row("16", "ID", "Idaho"),
    row("17", "IL", "Illinois"),
    row("18", "IN", "Indiana"),
    row("19", "IA", "Iowa"),
    row("20", "KS", "Kansas"),
    row("21", "KY", "Kentucky"),
    row("22", "LA", "Louisiana"),
    row("23", "ME", "Maine"),
    row("24", "MD", "Maryland"),
    row("25", "MA", "Massachusetts"),
    row("26", "MI", "Michigan"),
    row("27", "MN", "Minnesota"),
    row("28", "MS", "Mississippi"),
    row("29", "MO", "Missouri"),
    row("30", "MT", "Montana"),
    row("31", "NE", "Nebraska"),
    row("32", "NV", "Nevada"),
    row("33", "NH", "New Hampshire"),
    row("34", "NJ", "New Jersey"),
    row("35", "NM", "New Mexico"),
    row("36", "NY", "New York"),
    row("37", "NC", "North Carolina"),
    row("38", "ND", "North Dakota"),
    row("39", "OH", "Ohio"),
    row("40", "OK", "Oklahoma"),
    row("41", "OR", "Oregon"),
    row("42", "PA", "Pennsylvania"),
    row("44", "RI", "Rhode Island"),
    row("45", "SC", "South Carolina"),
    row("46", "SD", "South Dakota"),
    row("47", "TN", "Tennessee"),
    row("48", "TX", "Texas"),
    row("49", "UT", "Utah"),
    row("50", "VT", "Vermont"),
    row("51", "VA", "Virginia"),
    row("53", "WA", "Washington"),
    row("54", "WV", "West Virginia"),
    row("55", "WI", "Wisconsin"),
    row("56", "WY", "Wyoming"),
];

/// Looks up the table row for a FIPS code.
///
/// Surrounding whitespace is ignored and a single-digit code is treated as
/// zero-padded, since some boundary files store ids as bare integers.
#[must_use]
pub fn lookup(code: &str) -> Option<&'static StateFips> {
    let code = code.trim();
    match code.len() {
        1 => {
            let padded = format!("0{code}");
            STATES.iter().find(|s| s.code == padded)
        }
        _ => STATES.iter().find(|s| s.code == code),
    }
}

/// Resolves a FIPS code to the state's postal abbreviation.
#[must_use]
pub fn resolve(code: &str) -> Option<&'static str> {
    lookup(code).map(|s| s.abbr)
}

/// Maps a postal abbreviation back to its FIPS code (case-insensitive).
#[must_use]
pub fn abbr_to_fips(abbr: &str) -> Option<&'static str> {
    let abbr = abbr.trim();
    STATES
        .iter()
        .find(|s| s.abbr.eq_ignore_ascii_case(abbr))
        .map(|s| s.code)
}

/// Iterates every FIPS code in the table.
pub fn codes() -> impl Iterator<Item = &'static str> {
    STATES.iter().map(|s| s.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fips_count() {
        assert_eq!(STATES.len(), 51);
        assert_eq!(codes().count(), 51);
    }

    #[test]
    fn abbr_roundtrip() {
        for state in STATES {
            let abbr = resolve(state.code).unwrap();
            assert_eq!(
                abbr_to_fips(abbr),
                Some(state.code),
                "roundtrip failed for {} -> {abbr}",
                state.code
            );
        }
    }

    #[test]
    fn codes_are_sorted_and_unique() {
        let codes: Vec<&str> = codes().collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn unknown_codes_are_unresolved() {
        assert_eq!(resolve("72"), None);
        assert_eq!(resolve("03"), None);
        assert!(lookup("99").is_none());
        assert_eq!(abbr_to_fips("PR"), None);
    }

    #[test]
    fn short_and_padded_codes() {
        assert_eq!(resolve("6"), Some("CA"));
        assert_eq!(resolve(" 06 "), Some("CA"));
        assert_eq!(lookup("11").map(|s| s.name), Some("District of Columbia"));
    }

    #[test]
    fn case_insensitive_abbr_to_fips() {
        assert_eq!(abbr_to_fips("ca"), Some("06"));
        assert_eq!(abbr_to_fips("Tx"), Some("48"));
    }
}
