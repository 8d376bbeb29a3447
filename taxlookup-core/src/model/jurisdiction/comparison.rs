use serde::{Deserialize, Serialize};

/// result of comparing a claimed jurisdiction against a tax district.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Comparison {
    /// true when the claim names the district's city (city claims) or
    /// county (county claims)
    pub matched: bool,
    /// the jurisdiction the address actually falls in, for display
    pub actual: String,
}

impl Comparison {
    pub fn new(matched: bool, actual: &str) -> Comparison {
        Comparison {
            matched,
            actual: actual.to_string(),
        }
    }
}
