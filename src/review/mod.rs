//! Review submissions and their validation.

pub mod error;
pub mod image;
pub mod types;


pub use error::ReviewError;
pub use image::{ImageFormat, ReviewImage, decode_base64_image};
pub use types::{ProductReference, ReviewSubmission, SubmissionLimits, ValidatedSubmission};
