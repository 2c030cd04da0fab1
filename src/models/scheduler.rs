//! Leitner-box scheduling.
//!
//! Every box has a review interval in days. A passed card moves up one box (capped at the
//! last box); a failed card drops to box 1 or one box down, depending on [`OnFail`]. The
//! next due date is not `review + interval`: it is the first point strictly after the review
//! on a grid that starts at midnight of the day before `start_datetime` and repeats every
//! `interval` days. All cards in a box therefore share the same set of due dates no matter
//! when they were reviewed, and moving between boxes never accumulates drift.

use super::{Card, Rating, ReviewLog};
use crate::error::{ExportError, ParseError, SchedulerError};
use crate::export::json::import_json;
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Where a failed card goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnFail {
    /// Back to box 1.
    #[default]
    FirstBox,
    /// One box down, never below box 1.
    PrevBox,
}

fn default_box_intervals() -> Vec<u32> {
    vec![1, 2, 7]
}

/// Scheduler settings, in the shape they are persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Days between reviews for each box; position 0 is box 1.
    pub box_intervals: Vec<u32>,
    #[serde(with = "super::iso")]
    pub start_datetime: NaiveDateTime,
    pub on_fail: OnFail,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            box_intervals: default_box_intervals(),
            start_datetime: Local::now().naive_local(),
            on_fail: OnFail::default(),
        }
    }
}

impl SchedulerConfig {
    /// Reads a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        import_json(path)
    }
}

/// Stateless with respect to cards: the configuration is fixed at construction and each
/// review reads only its arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchedulerConfig")]
pub struct LeitnerScheduler {
    box_intervals: Vec<u32>,
    #[serde(with = "super::iso")]
    start_datetime: NaiveDateTime,
    on_fail: OnFail,
}

impl TryFrom<SchedulerConfig> for LeitnerScheduler {
    type Error = SchedulerError;

    fn try_from(config: SchedulerConfig) -> Result<Self, Self::Error> {
        Self::new(config)
    }
}

impl Default for LeitnerScheduler {
    fn default() -> Self {
        let config = SchedulerConfig::default();
        Self {
            box_intervals: config.box_intervals,
            start_datetime: config.start_datetime,
            on_fail: config.on_fail,
        }
    }
}

impl LeitnerScheduler {
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        if config.box_intervals.is_empty() {
            return Err(SchedulerError::EmptyIntervals);
        }
        if let Some(index) = config.box_intervals.iter().position(|&days| days == 0) {
            return Err(SchedulerError::ZeroInterval { index });
        }

        Ok(Self {
            box_intervals: config.box_intervals,
            start_datetime: config.start_datetime,
            on_fail: config.on_fail,
        })
    }

    pub fn box_intervals(&self) -> &[u32] {
        &self.box_intervals
    }

    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start_datetime
    }

    pub fn on_fail(&self) -> OnFail {
        self.on_fail
    }

    pub fn boxes(&self) -> usize {
        self.box_intervals.len()
    }

    pub fn config(&self) -> SchedulerConfig {
        SchedulerConfig {
            box_intervals: self.box_intervals.clone(),
            start_datetime: self.start_datetime,
            on_fail: self.on_fail,
        }
    }

    /// Reviews `card` and returns its updated state together with the log of this review.
    ///
    /// `review_datetime` defaults to the current local time. A card that was never reviewed
    /// is treated as due from midnight of the review day. The input card is left untouched;
    /// on error nothing changes.
    pub fn review_card(
        &self,
        card: &Card,
        rating: Rating,
        review_datetime: Option<NaiveDateTime>,
    ) -> Result<(Card, ReviewLog), SchedulerError> {
        let review_datetime = review_datetime.unwrap_or_else(|| Local::now().naive_local());
        self.check_box(card.box_number)?;

        let due = card
            .due
            .unwrap_or_else(|| review_datetime.date().and_time(NaiveTime::MIN));
        if review_datetime < due {
            log::warn!("Rejected review at {}: card is due {}", review_datetime, due);
            return Err(SchedulerError::NotDue { due });
        }

        let review_log = ReviewLog::new(rating, review_datetime, card.box_number);

        let box_number = self.next_box(card.box_number, rating);
        let next_due = self.next_due(box_number, review_datetime)?;

        log::debug!(
            "{:?} review at {}: box {} -> {}, due {}",
            rating,
            review_datetime,
            card.box_number,
            box_number,
            next_due
        );

        Ok((
            Card {
                box_number,
                due: Some(next_due),
            },
            review_log,
        ))
    }

    /// Same as [`review_card`](Self::review_card) but writes the result back into `card`.
    /// The card is only modified when the review succeeds.
    pub fn review_card_in_place(
        &self,
        card: &mut Card,
        rating: Rating,
        review_datetime: Option<NaiveDateTime>,
    ) -> Result<ReviewLog, SchedulerError> {
        let (updated, review_log) = self.review_card(card, rating, review_datetime)?;
        *card = updated;
        Ok(review_log)
    }

    /// Box a card in `box_number` moves to after a review with `rating`.
    pub fn next_box(&self, box_number: usize, rating: Rating) -> usize {
        match (rating, self.on_fail) {
            (Rating::Fail, OnFail::FirstBox) => 1,
            (Rating::Fail, OnFail::PrevBox) => box_number.saturating_sub(1).max(1),
            (Rating::Pass, _) => box_number.saturating_add(1).min(self.boxes()),
        }
    }

    /// First grid point for `box_number` strictly after `review_datetime`.
    pub fn next_due(
        &self,
        box_number: usize,
        review_datetime: NaiveDateTime,
    ) -> Result<NaiveDateTime, SchedulerError> {
        self.check_box(box_number)?;
        let interval_days = i64::from(self.box_intervals[box_number - 1]);
        let interval = Duration::days(interval_days);

        let begin = self
            .start_datetime
            .checked_sub_signed(Duration::days(1))
            .ok_or(SchedulerError::DateOutOfRange)?
            .date()
            .and_time(NaiveTime::MIN);

        // Smallest k >= 1 with begin + k * interval > review_datetime. Intervals are whole
        // days, so flooring the elapsed time to whole seconds does not change the quotient.
        let steps = if review_datetime < begin {
            1
        } else {
            (review_datetime - begin).num_seconds() / interval.num_seconds() + 1
        };

        let offset = steps
            .checked_mul(interval_days)
            .and_then(Duration::try_days)
            .ok_or(SchedulerError::DateOutOfRange)?;
        let due = begin
            .checked_add_signed(offset)
            .ok_or(SchedulerError::DateOutOfRange)?;

        debug_assert!(due > review_datetime);
        Ok(due)
    }

    fn check_box(&self, box_number: usize) -> Result<(), SchedulerError> {
        if (1..=self.boxes()).contains(&box_number) {
            Ok(())
        } else {
            Err(SchedulerError::BoxOutOfRange {
                box_number,
                boxes: self.boxes(),
            })
        }
    }

    pub fn to_dict(&self) -> Map<String, Value> {
        super::to_map(self)
    }

    pub fn from_dict(source: &Map<String, Value>) -> Result<Self, ParseError> {
        Ok(serde_json::from_value(Value::Object(source.clone()))?)
    }
}
