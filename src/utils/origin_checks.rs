use rand::Rng;

use crate::interfaces::origin_check::{OriginCheckInterface, SubmissionAttempt};

/// Flags a fixed share of attempts at random.
pub struct RandomOriginCheck {
    probability: f64,
}

impl RandomOriginCheck {
    pub fn new(probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { probability }
    }
}

impl OriginCheckInterface for RandomOriginCheck {
    fn is_duplicate_origin(&self, _attempt: &SubmissionAttempt<'_>) -> bool {
        rand::thread_rng().gen_bool(self.probability)
    }
}

/// Flags a worker who already holds a submission for the task.
#[derive(Default)]
pub struct RepeatSubmissionCheck;

impl OriginCheckInterface for RepeatSubmissionCheck {
    fn is_duplicate_origin(&self, attempt: &SubmissionAttempt<'_>) -> bool {
        attempt
            .existing
            .iter()
            .any(|s| s.task_id == attempt.task_id && s.worker_id == attempt.worker_id)
    }

    fn is_duplicate_on_record(&self, attempt: &SubmissionAttempt<'_>) -> bool {
        self.is_duplicate_origin(attempt)
    }
}
