//! Card is the scheduling state of one reviewable item: its box and its due date.
use crate::error::ParseError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "box", deserialize_with = "super::iso::box_number")]
    pub box_number: usize,
    /// Absent until the first review.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "super::iso::option"
    )]
    pub due: Option<NaiveDateTime>,
}

impl Default for Card {
    fn default() -> Self {
        Self {
            box_number: 1,
            due: None,
        }
    }
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    /// A card that was never reviewed is always due.
    pub fn is_due(&self, at: NaiveDateTime) -> bool {
        self.due.is_none_or(|due| at >= due)
    }

    pub fn to_dict(&self) -> Map<String, Value> {
        super::to_map(self)
    }

    pub fn from_dict(source: &Map<String, Value>) -> Result<Self, ParseError> {
        Ok(serde_json::from_value(Value::Object(source.clone()))?)
    }
}
