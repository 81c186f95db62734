/// Image ingestion module
///
/// This module handles:
/// - Reading user-selected image files
/// - Decoding and aspect-ratio-preserving downscaling
/// - Re-encoding as inline JPEG data URLs for storage on records

pub mod pipeline;
