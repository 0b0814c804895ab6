//! sehat-assess
//!
//! Risk assessment via an external generative model: prompt construction,
//! model backends (Gemini, Bedrock) and tolerant parsing of the JSON reply.

pub mod bedrock;
pub mod error;
pub mod gemini;
pub mod model;
pub mod parse;
pub mod prompt;
pub mod requester;

pub use model::{AssessmentModel, ModelRequest};
pub use requester::AssessmentRequester;
