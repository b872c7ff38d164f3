// Priority scoring heuristic
//
// Keyword hits and deadline proximity add up to an integer score which is
// then bucketed into a priority tier with a confidence value.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::deadline::{parse_deadline, DeadlineWindow};
use crate::keywords::{KeywordSet, LOW, MEDIUM, URGENT};
use crate::types::{Priority, ScoreInput, ScoreResult};

/// Weight of each urgent keyword found in the title
pub const URGENT_TITLE_WEIGHT: i32 = 2;

/// Weight of each medium keyword found in the title
pub const MEDIUM_TITLE_WEIGHT: i32 = 1;

/// Weight of each low keyword found in the title
pub const LOW_TITLE_WEIGHT: i32 = -1;

/// Weight of each urgent keyword found in the description
pub const URGENT_DESCRIPTION_WEIGHT: i32 = 1;

/// Minimum score for [`Priority::High`]
pub const HIGH_THRESHOLD: i32 = 4;

/// Minimum score for [`Priority::Medium`]
pub const MEDIUM_THRESHOLD: i32 = 1;

/// Reason used when no rule fired
pub const FALLBACK_REASON: &str = "Based on general analysis";

/// Reason used when the deadline text is not a timestamp
pub const UNPARSABLE_DEADLINE_REASON: &str = "Could not parse deadline";

const HIGH_BASE_CONFIDENCE: f64 = 0.6;
const HIGH_CONFIDENCE_STEP: f64 = 0.1;
const HIGH_MAX_CONFIDENCE: f64 = 0.9;
const MEDIUM_CONFIDENCE: f64 = 0.7;
const LOW_CONFIDENCE: f64 = 0.6;

/// Running score and the rules that moved it
#[derive(Debug, Default)]
struct Tally {
    score: i32,
    reasons: Vec<String>,
}

impl Tally {
    fn add(&mut self, delta: i32, reason: impl Into<String>) {
        self.score += delta;
        self.reasons.push(reason.into());
    }

    fn add_keywords(&mut self, set: &KeywordSet, text: &str, weight: i32, label: &str) {
        let count = set.count_matches(text);
        if count == 0 {
            return;
        }

        debug!(
            set = set.name,
            matched = ?set.matches(text).collect::<Vec<_>>(),
            "keyword hits"
        );
        self.add(weight * count as i32, format!("{}: {}", label, count));
    }

    fn reason(&self) -> String {
        if self.reasons.is_empty() {
            FALLBACK_REASON.to_string()
        } else {
            self.reasons.join("; ")
        }
    }
}

/// Map a raw score to a priority tier and confidence
///
/// Higher scores never produce a lower tier. Confidence is rounded to two
/// decimals and stays within `[0.6, 0.9]`.
pub fn classify(score: i32) -> (Priority, f64) {
    let (priority, confidence) = if score >= HIGH_THRESHOLD {
        let steps = f64::from(score - HIGH_THRESHOLD);
        let confidence =
            (HIGH_BASE_CONFIDENCE + steps * HIGH_CONFIDENCE_STEP).min(HIGH_MAX_CONFIDENCE);
        (Priority::High, confidence)
    } else if score >= MEDIUM_THRESHOLD {
        (Priority::Medium, MEDIUM_CONFIDENCE)
    } else {
        (Priority::Low, LOW_CONFIDENCE)
    };

    (priority, round_hundredths(confidence))
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Stateless priority scorer
///
/// Holds only the reference clock, so one instance can be shared across
/// threads and requests.
#[derive(Clone)]
pub struct PriorityScorer {
    clock: Arc<dyn Clock>,
}

impl PriorityScorer {
    /// Scorer reading the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Scorer reading `clock`
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    /// Score a task
    ///
    /// Never fails: deadline text that cannot be parsed is reported in the
    /// reason and leaves the score untouched.
    pub fn score(&self, input: &ScoreInput) -> ScoreResult {
        let mut tally = Tally::default();

        let title = input.title.to_lowercase();
        tally.add_keywords(&URGENT, &title, URGENT_TITLE_WEIGHT, "Contains urgent keywords");
        tally.add_keywords(
            &MEDIUM,
            &title,
            MEDIUM_TITLE_WEIGHT,
            "Contains medium priority keywords",
        );
        tally.add_keywords(&LOW, &title, LOW_TITLE_WEIGHT, "Contains low priority keywords");

        if let Some(description) = non_empty(input.description.as_deref()) {
            let description = description.to_lowercase();
            tally.add_keywords(
                &URGENT,
                &description,
                URGENT_DESCRIPTION_WEIGHT,
                "Description contains urgent keywords",
            );
        }

        if let Some(text) = non_empty(input.deadline.as_deref()) {
            match parse_deadline(text) {
                Ok(deadline) => {
                    let remaining = deadline.remaining(self.clock.as_ref());
                    let window = DeadlineWindow::from_remaining(remaining);
                    tally.add(window.boost(), window.reason());
                }
                Err(e) => {
                    debug!("{}", e);
                    tally.reasons.push(UNPARSABLE_DEADLINE_REASON.to_string());
                }
            }
        }

        let (suggested_priority, confidence) = classify(tally.score);
        debug!(score = tally.score, priority = %suggested_priority, confidence, "scored task");

        ScoreResult {
            suggested_priority,
            reason: tally.reason(),
            confidence,
        }
    }
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PriorityScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityScorer").finish_non_exhaustive()
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

/// Score a task against the system clock
pub fn score(title: &str, description: Option<&str>, deadline: Option<&str>) -> ScoreResult {
    let input = ScoreInput {
        title: title.to_string(),
        description: description.map(str::to_string),
        deadline: deadline.map(str::to_string),
    };
    PriorityScorer::new().score(&input)
}
