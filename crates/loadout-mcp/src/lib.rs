pub mod protocol;
pub mod server;
pub mod telemetry;

pub use server::LoadoutServer;
pub use telemetry::init_tracing;
