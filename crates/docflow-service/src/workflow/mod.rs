//! Synchronous workflow engines.
//!
//! Every engine maps (current state, input, actor, timestamp) to a new
//! state without touching the store. On error nothing is returned and the
//! input documents are left as they were.

pub mod audit;
pub mod batch;
pub mod create;
pub mod reissue;
pub mod transition;
pub mod transmittal;

pub use audit::{FieldChange, MetadataAuditor, MetadataOutcome};
pub use batch::{BatchEngine, BatchItem, BatchOutcome, BatchRequest};
pub use create::DocumentFactory;
pub use reissue::{ReissueEngine, ReissueOutcome, ReissueRequest};
pub use transition::{TransitionEngine, TransitionOutcome, TransitionRequest};
pub use transmittal::{CodeSource, SequentialCodeSource, TransmittalGenerator, UuidCodeSource};
