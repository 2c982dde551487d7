use crate::domain::{ProvisionFailure, ProvisionReport, ProvisionStage};

/// State-machine events a provisioning run emits.
#[derive(Debug)]
pub enum ProvisionEvent<'a> {
    StageStarted { stage: ProvisionStage },
    StageCompleted { stage: ProvisionStage },
    /// A best-effort step failed and the run continued.
    StepSkipped { stage: ProvisionStage, step: &'a str, reason: String },
    Completed(&'a ProvisionReport),
    Failed(&'a ProvisionFailure),
}

/// Port receiving provisioning events; one instance serves a whole run.
pub trait Reporter {
    fn report(&self, event: ProvisionEvent<'_>);
}
