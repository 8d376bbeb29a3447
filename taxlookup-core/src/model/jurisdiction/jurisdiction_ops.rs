use super::Comparison;
use itertools::Itertools;
use regex::Regex;
use std::sync::LazyLock;

pub const UNINCORPORATED: &str = "Unincorporated area";
pub const UNKNOWN: &str = "Unknown";

/// "city", "county", "city of", "county of" as whole words
static DESIGNATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:city|county)(?:\s+of)?\b").expect("designation regex is a valid literal")
});

/// reduces a jurisdiction name to the bare place name so that the different
/// ways a city or county is written compare equal.
///
/// ```
/// use taxlookup_core::model::jurisdiction::jurisdiction_ops::normalize;
/// assert_eq!(normalize("City of Sacramento"), "sacramento");
/// assert_eq!(normalize("Sacramento, City of"), "sacramento");
/// assert_eq!(normalize("Sacramento County"), "sacramento");
/// ```
pub fn normalize(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let stripped = DESIGNATION.replace_all(&lower, " ").replace(',', " ");
    stripped.split_whitespace().join(" ")
}

/// a claim is about a city when it mentions "city" anywhere, otherwise it
/// is about a county.
pub fn is_city_claim(claim: &str) -> bool {
    claim.to_lowercase().contains("city")
}

/// compares a claimed jurisdiction against the city and county of the
/// district an address falls in.
///
/// city claims must match the district city. an address with no city is
/// unincorporated and never satisfies a city claim. county claims must
/// match the district county.
pub fn compare(claim: &str, actual_city: Option<&str>, actual_county: Option<&str>) -> Comparison {
    let normalized_claim = normalize(claim);
    let actual_city = actual_city.filter(|c| !c.trim().is_empty());
    let actual_county = actual_county.filter(|c| !c.trim().is_empty());

    if is_city_claim(claim) {
        match actual_city {
            Some(city) => Comparison::new(normalized_claim == normalize(city), city),
            None => Comparison::new(false, actual_county.unwrap_or(UNINCORPORATED)),
        }
    } else {
        match actual_county {
            Some(county) => Comparison::new(normalized_claim == normalize(county), county),
            None => Comparison::new(false, UNKNOWN),
        }
    }
}
