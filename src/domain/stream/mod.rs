//! Completion stream decoding

mod decoder;

pub use decoder::{DONE_SENTINEL, DecodeStep, DecoderState, DeltaDecoder, SseUnit};
