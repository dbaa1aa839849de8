//! Translation integration - external translation backends

pub mod google;
pub mod languages;

pub use google::GoogleProvider;
pub use languages::{google_catalog, GOOGLE_LANGUAGES};
