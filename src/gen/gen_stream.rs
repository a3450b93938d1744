use crate::Result;
use futures::Stream;
use std::pin::Pin;

/// Stream of generation events, in provider order.
pub type GenStream = Pin<Box<dyn Stream<Item = Result<GenStreamEvent>> + Send>>;

/// Response of a streaming generation call.
pub struct GenStreamResponse {
	pub stream: GenStream,
}

/// One event of a streaming generation.
///
/// `End` is emitted exactly once, after the last chunk; an `Err` item ends
/// the stream without it.
#[derive(Debug, Clone)]
pub enum GenStreamEvent {
	Chunk(String),
	End,
}
