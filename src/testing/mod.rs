mod fake_system;
mod fixed_secret;
mod host;
mod recording_reporter;

pub use fake_system::{FakeSystemOps, SystemCall};
pub use fixed_secret::FixedSecretGenerator;
pub use host::{TestContext, TestHost, input};
pub use recording_reporter::{RecordedEvent, RecordingReporter};
