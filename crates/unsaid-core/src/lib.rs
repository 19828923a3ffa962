pub mod analysis;
pub mod coerce;
pub mod error;
pub mod export;
pub mod flow;
pub mod payment;
pub mod prompts;
pub mod translation;

pub use analysis::*;
pub use coerce::*;
pub use error::*;
pub use export::*;
pub use flow::*;
pub use payment::*;
pub use prompts::*;
pub use translation::*;
