use crate::model::jurisdiction::Comparison;
use serde::{Deserialize, Serialize};

/// answer to "is this address inside the claimed jurisdiction?"
///
/// serialized with a `status` tag:
/// `{"status": "accepted", "claimed_jurisdiction": .., "actual_jurisdiction": .., "matched_address": ..}`
/// or `{"status": "error", "message": ..}`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Accepted {
        claimed_jurisdiction: String,
        actual_jurisdiction: String,
        matched_address: String,
    },
    Denied {
        claimed_jurisdiction: String,
        actual_jurisdiction: String,
        matched_address: String,
    },
    Error {
        message: String,
    },
}

impl ValidationOutcome {
    pub const ERR_NOT_GEOCODED: &str = "Address could not be geocoded";
    pub const ERR_OUTSIDE_DATASET: &str = "Address not found in California tax district data";

    pub fn from_comparison(claim: &str, comparison: Comparison, matched_address: String) -> Self {
        let claimed_jurisdiction = claim.to_string();
        let actual_jurisdiction = comparison.actual;
        if comparison.matched {
            ValidationOutcome::Accepted {
                claimed_jurisdiction,
                actual_jurisdiction,
                matched_address,
            }
        } else {
            ValidationOutcome::Denied {
                claimed_jurisdiction,
                actual_jurisdiction,
                matched_address,
            }
        }
    }

    pub fn error(message: &str) -> Self {
        ValidationOutcome::Error {
            message: message.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ValidationOutcome::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let outcome = ValidationOutcome::from_comparison(
            "City of Sacramento",
            Comparison::new(true, "Sacramento"),
            String::from("1315 10th St, Sacramento, California, 95814"),
        );
        let json = serde_json::to_value(&outcome).expect("test failed");
        assert_eq!(
            json,
            serde_json::json!({
                "status": "accepted",
                "claimed_jurisdiction": "City of Sacramento",
                "actual_jurisdiction": "Sacramento",
                "matched_address": "1315 10th St, Sacramento, California, 95814"
            })
        );

        let json = serde_json::to_value(ValidationOutcome::error("boom")).expect("test failed");
        assert_eq!(json, serde_json::json!({"status": "error", "message": "boom"}));
    }
}
