//! View-state orchestration for Algorithmic Guard: the scan/strategy state
//! machine, persisted history, narration playback, and dashboard figures.

pub mod dashboard;
pub mod error;
pub mod history;
pub mod narration;
pub mod session;
pub mod state;
pub mod store;

pub use error::StoreError;
pub use narration::Narrator;
pub use session::{AuditService, ScanOutcome, ScanTicket, Session, StrategyOutcome, StrategyTicket};
pub use state::{
    Action, AnalysisState, RequestId, SCAN_FAILED_MESSAGE, STRATEGY_FAILED_MESSAGE,
};
pub use store::{FileStore, KeyValueStore, MemoryStore};
