pub mod best_match;
pub mod classify;
pub mod init_config;
pub mod matching;
pub mod signature;

pub use best_match::*;
pub use classify::*;
pub use init_config::*;
pub use matching::*;
pub use signature::*;
