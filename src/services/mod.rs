pub mod extraction_request;
pub mod extraction_service;
pub mod image_encoder;
pub mod inference;
pub mod result_writer;

pub use extraction_request::ExtractionRequest;
pub use extraction_service::ExtractionService;
pub use image_encoder::{read_image, ImagePayload};
pub use inference::{InferenceResponse, InferenceService};
pub use result_writer::ResultWriter;
