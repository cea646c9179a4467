pub mod decision;
pub mod event;

pub use decision::{Decision, DecisionSource};
pub use event::{ProgressEvent, ProgressState};
