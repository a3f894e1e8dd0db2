// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod arcade;
pub mod config;
pub mod game;
pub mod games;
pub mod level;
pub mod runtime;
pub mod scoreboard;
pub mod scoring;
pub mod session;
pub mod timer;

pub use game::{GameKind, MiniGame, Resolution, Transition};
pub use level::Level;
pub use session::{Callbacks, Host, HostEvent, Ignored, Phase, Session, Submission};
