pub mod generate;
pub mod session;

pub use generate::generate_random;
pub use session::{BridgeStatus, EditorEvent, EditorSession, PendingQuery};
