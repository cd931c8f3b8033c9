pub mod extractor;

pub use extractor::{extract_body_quad, BodyPart, PoseExtractor, PoseExtractorParams};
