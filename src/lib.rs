//! # diskscrub
//!
//! A privacy-first disk hygiene utility.
//!
//! diskscrub discovers reclaimable cache data and privacy-sensitive
//! artifacts on the local filesystem, reports their size and category, and
//! removes them — optionally via a DoD 5220.22-M style multi-pass secure
//! overwrite instead of an ordinary delete. It features:
//!
//! - **Declarative Scan Targets**: browser, package-manager and build caches
//! - **Tolerant Traversal**: one unreadable subtree never aborts a scan
//! - **Privacy Dashboard**: audit shell history, browser history, credentials
//! - **Secure Shredding**: zero → one → random passes, flushed per pass
//! - **Safety-First**: clean targets are validated against the last scan and
//!   against a protected-path list before anything is touched
//! - **100% Offline**: no telemetry, no accounts, no persisted state

pub mod cleaner;
pub mod cli;
pub mod common;
pub mod privacy;
pub mod scanner;
pub mod shredder;
