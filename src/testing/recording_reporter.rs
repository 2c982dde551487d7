use std::sync::Mutex;

use crate::domain::{ErrorClass, ProvisionReport, ProvisionStage};
use crate::ports::{ProvisionEvent, Reporter};

/// Owned copy of a [`ProvisionEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    StageStarted(ProvisionStage),
    StageCompleted(ProvisionStage),
    StepSkipped { stage: ProvisionStage, step: String },
    Completed(ProvisionReport),
    Failed { stage: ProvisionStage, class: ErrorClass },
}

#[derive(Default)]
pub struct RecordingReporter {
    pub events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Stages reported as completed, in order.
    pub fn completed_stages(&self) -> Vec<ProvisionStage> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RecordedEvent::StageCompleted(stage) => Some(stage),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: ProvisionEvent<'_>) {
        let recorded = match event {
            ProvisionEvent::StageStarted { stage } => RecordedEvent::StageStarted(stage),
            ProvisionEvent::StageCompleted { stage } => RecordedEvent::StageCompleted(stage),
            ProvisionEvent::StepSkipped { stage, step, .. } => {
                RecordedEvent::StepSkipped { stage, step: step.to_string() }
            }
            ProvisionEvent::Completed(report) => RecordedEvent::Completed(report.clone()),
            ProvisionEvent::Failed(failure) => {
                RecordedEvent::Failed { stage: failure.stage, class: failure.error.class() }
            }
        };
        self.events.lock().unwrap().push(recorded);
    }
}
