mod state;

pub use state::{OperationMode, RephraseConfig, SessionState, TranslateConfig};
