use crate::domain::{AppError, ProvisionStage, StepPolicy};
use crate::ports::{ProvisionEvent, Reporter};

/// Apply `policy` to the outcome of one step.
///
/// A fatal failure is returned as-is. A best-effort failure is reported as
/// skipped and yields `Ok(None)`.
pub fn apply_policy<T, R: Reporter>(
    reporter: &R,
    stage: ProvisionStage,
    step: &str,
    policy: StepPolicy,
    result: Result<T, AppError>,
) -> Result<Option<T>, AppError> {
    match (result, policy) {
        (Ok(value), _) => Ok(Some(value)),
        (Err(err), StepPolicy::Fatal) => Err(err),
        (Err(err), StepPolicy::BestEffort) => {
            reporter.report(ProvisionEvent::StepSkipped { stage, step, reason: err.to_string() });
            Ok(None)
        }
    }
}
