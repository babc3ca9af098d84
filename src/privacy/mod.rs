pub mod registry;

pub use registry::{default_registry, is_registered, locate, PrivacyItem, PrivacySpec};
