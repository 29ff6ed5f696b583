mod contributor;
mod countdown;
mod error;
mod event;
mod pagination;
mod pr;
mod proposal;
mod ranking;
mod repo;
mod roadmap;
mod score;

#[cfg(feature = "github")]
pub mod github;

#[cfg(feature = "client")]
pub mod source;

pub use contributor::*;
pub use countdown::*;
pub use error::*;
pub use event::*;
pub use pagination::*;
pub use pr::*;
pub use proposal::*;
pub use ranking::*;
pub use repo::*;
pub use roadmap::*;
pub use score::*;

pub type GithubHandle = String;
