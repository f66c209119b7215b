//! Search time direction.

use serde::{Deserialize, Serialize};

/// Whether a search runs forward in time (depart-at) or backward
/// from the arrival (arrive-by).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchDirection {
    #[default]
    Forward,
    Reverse,
}

impl SearchDirection {
    pub fn is_forward(self) -> bool {
        self == SearchDirection::Forward
    }

    pub fn is_in_reverse(self) -> bool {
        self == SearchDirection::Reverse
    }

    /// Maps the `arriveBy` flag used by requests onto a direction.
    pub fn from_arrive_by(arrive_by: bool) -> Self {
        if arrive_by {
            SearchDirection::Reverse
        } else {
            SearchDirection::Forward
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrive_by_is_reverse() {
        assert!(SearchDirection::from_arrive_by(true).is_in_reverse());
        assert!(SearchDirection::from_arrive_by(false).is_forward());
        assert_eq!(SearchDirection::default(), SearchDirection::Forward);
    }
}
