/// Views for each screen
///
/// Screens hold the state they own while mounted (gallery.rs, detail.rs);
/// the rest is plain view code.

pub mod common;
pub mod detail;
pub mod gallery;
pub mod not_found;
