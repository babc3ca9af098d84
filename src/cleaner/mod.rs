pub mod engine;

pub use engine::{CleanReport, Coordinator};
