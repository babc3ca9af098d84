pub mod cancel;
pub mod errors;
pub mod format;
pub mod scope;

pub use cancel::CancelToken;
pub use errors::CleanError;
pub use scope::CleanupScope;
