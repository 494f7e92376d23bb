//! Results of finished test sessions, aggregated per deck.

use chrono::{DateTime, Duration, Utc};
use flashdeck_core::model::{DeckTitle, TestSummary};

/// One completed test session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    pub deck_title: DeckTitle,
    pub total: usize,
    pub correct: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl TestRecord {
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.completed_at - self.started_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckStatistics {
    pub tests: usize,
    pub cards_tested: usize,
    pub cards_correct: usize,
    pub time_spent: Duration,
}

impl Default for DeckStatistics {
    fn default() -> Self {
        Self {
            tests: 0,
            cards_tested: 0,
            cards_correct: 0,
            time_spent: Duration::zero(),
        }
    }
}

impl DeckStatistics {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn accuracy_percent(&self) -> f64 {
        if self.cards_tested == 0 {
            return 0.0;
        }
        self.cards_correct as f64 * 100.0 / self.cards_tested as f64
    }

    fn add(mut self, record: &TestRecord) -> Self {
        self.tests += 1;
        self.cards_tested += record.total;
        self.cards_correct += record.correct;
        self.time_spent += record.duration();
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatisticsLog {
    records: Vec<TestRecord>,
}

impl StatisticsLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished session. Unfinished summaries are ignored.
    pub fn record(&mut self, summary: &TestSummary) -> bool {
        let Some(completed_at) = summary.completed_at else {
            return false;
        };
        self.records.push(TestRecord {
            deck_title: summary.deck_title.clone(),
            total: summary.answered,
            correct: summary.correct,
            started_at: summary.started_at,
            completed_at,
        });
        true
    }

    #[must_use]
    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    #[must_use]
    pub fn for_deck(&self, title: &DeckTitle) -> DeckStatistics {
        self.records
            .iter()
            .filter(|r| r.deck_title.eq_ignore_case(title))
            .fold(DeckStatistics::default(), DeckStatistics::add)
    }

    #[must_use]
    pub fn overall(&self) -> DeckStatistics {
        self.records
            .iter()
            .fold(DeckStatistics::default(), DeckStatistics::add)
    }

    /// Keep a renamed deck's history attached to it.
    pub fn rename_deck(&mut self, from: &DeckTitle, to: &DeckTitle) {
        for record in &mut self.records {
            if record.deck_title.eq_ignore_case(from) {
                record.deck_title = to.clone();
            }
        }
    }

    /// Forget a deleted deck's history so a later deck with the same title starts fresh.
    pub fn remove_deck(&mut self, title: &DeckTitle) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !r.deck_title.eq_ignore_case(title));
        before - self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeck_core::time::fixed_now;

    fn summary(title: &str, answered: usize, correct: usize, secs: i64) -> TestSummary {
        TestSummary {
            deck_title: DeckTitle::parse(title).unwrap(),
            total: answered,
            answered,
            correct,
            started_at: fixed_now(),
            completed_at: Some(fixed_now() + Duration::seconds(secs)),
        }
    }

    #[test]
    fn aggregates_per_deck_and_overall() {
        let mut log = StatisticsLog::new();
        assert!(log.record(&summary("Math", 4, 3, 30)));
        assert!(log.record(&summary("math", 2, 2, 10)));
        assert!(log.record(&summary("Art", 5, 0, 60)));

        let math = log.for_deck(&DeckTitle::parse("MATH").unwrap());
        assert_eq!(math.tests, 2);
        assert_eq!(math.cards_tested, 6);
        assert_eq!(math.cards_correct, 5);
        assert_eq!(math.time_spent, Duration::seconds(40));

        let overall = log.overall();
        assert_eq!(overall.tests, 3);
        assert_eq!(overall.cards_tested, 11);
    }

    #[test]
    fn unfinished_sessions_are_not_recorded() {
        let mut log = StatisticsLog::new();
        let mut open = summary("Math", 1, 1, 5);
        open.completed_at = None;
        assert!(!log.record(&open));
        assert!(log.records().is_empty());
        assert!(log.overall().accuracy_percent().abs() < f64::EPSILON);
    }

    #[test]
    fn remove_deck_drops_only_that_deck() {
        let mut log = StatisticsLog::new();
        log.record(&summary("Math", 2, 1, 5));
        log.record(&summary("Art", 1, 1, 5));
        assert_eq!(log.remove_deck(&DeckTitle::parse("MATH").unwrap()), 1);
        assert_eq!(log.overall().tests, 1);
        assert_eq!(log.records()[0].deck_title.as_str(), "Art");
    }

    #[test]
    fn rename_moves_history() {
        let mut log = StatisticsLog::new();
        log.record(&summary("Math", 2, 1, 5));
        let from = DeckTitle::parse("Math").unwrap();
        let to = DeckTitle::parse("Algebra").unwrap();
        log.rename_deck(&from, &to);
        assert_eq!(log.for_deck(&to).tests, 1);
        assert_eq!(log.for_deck(&from).tests, 0);
        assert!((log.for_deck(&to).accuracy_percent() - 50.0).abs() < f64::EPSILON);
    }
}
