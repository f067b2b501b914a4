//! Camera scan intake.

mod debouncer;
mod event;

pub use debouncer::ScanDebouncer;
pub use event::ScanEvent;
