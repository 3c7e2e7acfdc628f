pub mod clock;
pub mod constants;
pub mod engine;
pub mod error;
pub mod event;
pub mod magnitude;
pub mod placement;
pub mod probe;
pub mod visual;
pub mod voice;

pub use clock::*;
pub use constants::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use magnitude::*;
pub use placement::*;
pub use probe::*;
pub use visual::*;
pub use voice::*;
