pub mod coordinator;
pub mod local;
pub mod remote;
pub mod traits;

pub use coordinator::{Coordinator, PlaybackPhase, PlaybackState};
pub use local::LocalEngine;
pub use remote::RemoteEngine;
pub use traits::{EngineEvent, EngineState, PlaybackEngine};
