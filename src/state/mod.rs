/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The paginated gallery loader (gallery.rs)
/// - The single-photo detail loader (detail.rs)
/// - The infinite-scroll trigger (scroll.rs)
/// - The in-flight request guard both loaders share (guard.rs)

pub mod data;
pub mod detail;
pub mod gallery;
pub mod guard;
pub mod scroll;
