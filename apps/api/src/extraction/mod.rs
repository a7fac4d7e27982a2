//! Rule-based resume extraction: raw text → sections → entries and entities
//! → APP document with confidence scores.

pub mod confidence;
pub mod entities;
pub mod entries;
pub mod fields;
pub mod handlers;
pub mod mapper;
pub mod normalize;
pub mod patterns;
pub mod pipeline;
pub mod segmenter;
pub mod skills;
pub mod validation;

pub use pipeline::{process, ProcessingResult};
