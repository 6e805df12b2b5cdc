use crate::entities::submission::Submission;

pub struct SubmissionAttempt<'a> {
    pub task_id: &'a str,
    pub worker_id: &'a str,
    /// Submissions already on record across the marketplace.
    pub existing: &'a [Submission],
}

/// Decides whether a proof comes from a network origin that already
/// attempted the task.
pub trait OriginCheckInterface {
    fn is_duplicate_origin(&self, attempt: &SubmissionAttempt<'_>) -> bool;

    /// Asked again when the submission is recorded. Checks that draw at
    /// random keep the verdict of the first call.
    fn is_duplicate_on_record(&self, _attempt: &SubmissionAttempt<'_>) -> bool {
        false
    }
}
