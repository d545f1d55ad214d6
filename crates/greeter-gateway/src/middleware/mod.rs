//! Service decorators.
//!
//! Each decorator implements `GreetingService`, owns a shared handle to the
//! next service in the chain, performs its side effect, and forwards the call.
//! Outer decorators observe a call first on the way in and last on the way out.

pub mod gate;
pub mod instrumenting;
pub mod logging;

pub use gate::OnceGate;
pub use instrumenting::InstrumentingService;
pub use logging::{LoggingService, RpcLoggingService};
