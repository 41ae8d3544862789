pub mod advisory;
pub mod crop;
pub mod farmer;
pub mod fertilizer;
pub mod market;
pub mod recommendation;
pub mod reference;
pub mod soil;
pub mod weather;

pub use advisory::*;
pub use crop::*;
pub use farmer::*;
pub use fertilizer::*;
pub use market::*;
pub use recommendation::*;
pub use reference::*;
pub use soil::*;
pub use weather::*;
