//! Review session over the cards that are due at a given moment.
//! Walks the due cards in order, runs each rating through the scheduler and keeps the
//! resulting review logs.

use super::{Card, LeitnerScheduler, Rating, ReviewLog};
use crate::error::SchedulerError;
use chrono::NaiveDateTime;

/// Holds the caller's cards for the duration of a session; hand them back with
/// [`into_parts`](ReviewSession::into_parts).
pub struct ReviewSession {
    /// Free-form name used in log output.
    pub label: String,
    scheduler: LeitnerScheduler,
    cards: Vec<Card>,
    queue: Vec<usize>,
    current_index: usize,
    review_logs: Vec<ReviewLog>,
}

impl ReviewSession {
    /// Queues every card due at `at`. Never-reviewed cards come first, then the rest by due
    /// date, oldest first.
    pub fn new_from_due_cards(
        label: String,
        scheduler: LeitnerScheduler,
        cards: Vec<Card>,
        at: NaiveDateTime,
    ) -> Self {
        let mut queue: Vec<usize> = (0..cards.len()).filter(|&i| cards[i].is_due(at)).collect();
        // Option orders None before Some; the sort is stable so ties keep deck order.
        queue.sort_by_key(|&i| cards[i].due);

        log::info!(
            "Session for '{}': {} of {} cards due at {}",
            label,
            queue.len(),
            cards.len(),
            at
        );

        Self {
            label,
            scheduler,
            cards,
            queue,
            current_index: 0,
            review_logs: Vec::new(),
        }
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.queue
            .get(self.current_index)
            .and_then(|&idx| self.cards.get(idx))
    }

    /// Grades the current card and moves to the next one.
    /// On error the card stays current and unchanged.
    pub fn grade_current_card(
        &mut self,
        rating: Rating,
        review_datetime: Option<NaiveDateTime>,
    ) -> Result<Option<&ReviewLog>, SchedulerError> {
        let Some(&idx) = self.queue.get(self.current_index) else {
            return Ok(None);
        };

        let review_log =
            self.scheduler
                .review_card_in_place(&mut self.cards[idx], rating, review_datetime)?;

        self.review_logs.push(review_log);
        self.current_index += 1;
        Ok(self.review_logs.last())
    }

    /// Leaves the current card as it is and moves on.
    pub fn skip_current_card(&mut self) {
        if self.current_index < self.queue.len() {
            self.current_index += 1;
        }
    }

    pub fn reviewed_count(&self) -> usize {
        self.review_logs.len()
    }

    pub fn passed_count(&self) -> usize {
        self.review_logs
            .iter()
            .filter(|log| log.rating() == Rating::Pass)
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.queue.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.current_index
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.queue.len()
    }

    pub fn review_logs(&self) -> &[ReviewLog] {
        &self.review_logs
    }

    /// Returns the updated cards, in their original order, and the logs of this session.
    pub fn into_parts(self) -> (Vec<Card>, Vec<ReviewLog>) {
        (self.cards, self.review_logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OnFail, SchedulerConfig};
    use chrono::NaiveDate;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn create_test_session(now: NaiveDateTime) -> ReviewSession {
        let scheduler = LeitnerScheduler::new(SchedulerConfig {
            box_intervals: vec![1, 2, 7],
            start_datetime: at(8, 0),
            on_fail: OnFail::FirstBox,
        })
        .unwrap();

        let cards = vec![
            Card {
                box_number: 2,
                due: Some(at(9, 0)),
            },
            Card {
                box_number: 3,
                due: Some(at(14, 0)),
            },
            Card::new(),
        ];

        ReviewSession::new_from_due_cards("morning".to_string(), scheduler, cards, now)
    }

    #[test]
    fn test_only_due_cards_are_queued() {
        let session = create_test_session(at(10, 8));

        assert_eq!(session.label, "morning");
        assert_eq!(session.total_count(), 2);
        assert_eq!(session.remaining_count(), 2);
        assert!(!session.is_completed());
    }

    #[test]
    fn test_new_cards_come_first() {
        let session = create_test_session(at(10, 8));

        assert_eq!(session.current_card(), Some(&Card::new()));
    }

    #[test]
    fn test_grading_walks_the_queue() {
        let mut session = create_test_session(at(10, 8));

        let log = session
            .grade_current_card(Rating::Pass, Some(at(10, 9)))
            .unwrap()
            .cloned()
            .unwrap();
        assert_eq!(log.box_number(), 1);

        session
            .grade_current_card(Rating::Fail, Some(at(10, 9)))
            .unwrap();

        assert!(session.is_completed());
        assert_eq!(session.reviewed_count(), 2);
        assert_eq!(session.passed_count(), 1);
        assert!(session.current_card().is_none());
        assert!(
            session
                .grade_current_card(Rating::Pass, Some(at(10, 9)))
                .unwrap()
                .is_none()
        );

        let (cards, logs) = session.into_parts();
        assert_eq!(logs.len(), 2);
        assert_eq!(cards[0].box_number, 1);
        assert_eq!(cards[0].due, Some(at(11, 0)));
        assert_eq!(cards[1].due, Some(at(14, 0)));
        assert_eq!(cards[2].box_number, 2);
        assert_eq!(cards[2].due, Some(at(11, 0)));
    }

    #[test]
    fn test_error_keeps_current_card() {
        let mut session = create_test_session(at(10, 8));
        session.skip_current_card();

        // The queue was built at 10th 08:00, grading with an earlier time is not allowed.
        let result = session.grade_current_card(Rating::Pass, Some(at(8, 12)));

        assert!(matches!(result, Err(SchedulerError::NotDue { .. })));
        assert_eq!(session.remaining_count(), 1);
        assert_eq!(session.reviewed_count(), 0);
    }

    #[test]
    fn test_nothing_due() {
        let mut session = create_test_session(at(8, 8));

        assert_eq!(session.total_count(), 1);
        session.skip_current_card();
        session.skip_current_card();
        assert!(session.is_completed());
        assert_eq!(session.remaining_count(), 0);
    }
}
