use crate::ports::{ProvisionEvent, Reporter};

/// Reporter that emits provisioning events as structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: ProvisionEvent<'_>) {
        match event {
            ProvisionEvent::StageStarted { stage } => {
                tracing::debug!(stage = stage.label(), "stage started");
            }
            ProvisionEvent::StageCompleted { stage } => {
                tracing::info!(stage = stage.label(), "stage completed");
            }
            ProvisionEvent::StepSkipped { stage, step, reason } => {
                tracing::warn!(
                    stage = stage.label(),
                    step,
                    reason = %reason,
                    "best-effort step failed, continuing"
                );
            }
            ProvisionEvent::Completed(report) => {
                tracing::info!(
                    owner = %report.owner_id,
                    instance = %report.instance_id,
                    engine = %report.engine,
                    uid = report.account.as_ref().map(|account| account.uid),
                    unit = %report.unit,
                    root = %report.root.display(),
                    server_port = report.server_port,
                    rcon_port = report.rcon_port,
                    query_port = report.query_port,
                    jar = %report.engine_jar,
                    "Successfully deployed {} on port {}",
                    report.unit,
                    report.server_port
                );
            }
            ProvisionEvent::Failed(failure) => {
                let command = failure.error.command_failure();
                tracing::error!(
                    stage = failure.stage.label(),
                    class = failure.error.class().label(),
                    exit_code = failure.exit_code(),
                    command = command.map(|c| c.command.as_str()),
                    command_status = command.and_then(|c| c.exit_code),
                    stderr = command.map(|c| c.stderr.as_str()),
                    error = %failure.error,
                    "provisioning failed"
                );
            }
        }
    }
}
