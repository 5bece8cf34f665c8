pub mod dispatch;
pub mod gate;
pub mod overlay;
pub mod sink;

pub use dispatch::{Dispatcher, TickOutcome};
pub use gate::ChangeGate;
pub use sink::{Envelope, Sink};
