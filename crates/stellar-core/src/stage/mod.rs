mod coordinator;
mod event;

pub use coordinator::{StageCoordinator, StageEffect};
pub use event::{Stage, StageEvent, StageOutcome};
