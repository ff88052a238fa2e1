//! tchat 固有のドメイン型（型と不変条件）

pub mod caption;
pub mod command;
pub mod event;
pub mod fingerprint;
pub mod instruction;
pub mod message;
pub mod session;
pub mod transcript;

pub use command::ChatCommand;
pub use event::SessionEvent;
pub use fingerprint::ContentFingerprint;
pub use message::{replay_history, ChatMessage, Role, Usage};
pub use session::Session;
pub use transcript::{CombinedText, TranscriptBundle, TranscriptFile};
