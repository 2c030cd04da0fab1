//! Immutable record of one review: the rating, when it happened and the box the card was in
//! before the review moved it.
use super::Rating;
use crate::error::ParseError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewLog {
    rating: Rating,
    #[serde(with = "super::iso")]
    review_datetime: NaiveDateTime,
    #[serde(rename = "box", deserialize_with = "super::iso::box_number")]
    box_number: usize,
}

impl ReviewLog {
    pub fn new(rating: Rating, review_datetime: NaiveDateTime, box_number: usize) -> Self {
        Self {
            rating,
            review_datetime,
            box_number,
        }
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn review_datetime(&self) -> NaiveDateTime {
        self.review_datetime
    }

    /// Box at review time, before the transition.
    pub fn box_number(&self) -> usize {
        self.box_number
    }

    pub fn to_dict(&self) -> Map<String, Value> {
        super::to_map(self)
    }

    pub fn from_dict(source: &Map<String, Value>) -> Result<Self, ParseError> {
        Ok(serde_json::from_value(Value::Object(source.clone()))?)
    }
}
