//! Backend and browser services.
//!
//! - [`upload`] - export upload to the RevFlow backend
//! - [`download`] - cleaned CSV download through a Blob URL

pub mod download;
pub mod upload;

pub use download::*;
pub use upload::*;
