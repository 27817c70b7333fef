mod auth;
mod event_handler;
mod pipeline;
mod speech;
mod state;

pub use event_handler::handle_backend_event;
pub use pipeline::dispatch_health_check;
pub use state::{AppState, BackendEvent, Page};
