pub mod config;
pub mod engine;
pub mod error;
pub mod map;

mod lines;
mod reconcile;
mod restore;

pub use config::CommentedIni;
pub use engine::Ini;
pub use error::Error;
pub use lines::HEADER;
pub use map::CommentMap;
