//! Stream adapters that turn a streaming HTTP body into text fragments.
//!
//! The body is a sequence of `data: <json>` lines ended by `data: [DONE]`.
//! [`LineStream`] splits raw byte chunks into lines, and [`FragmentStream`]
//! decodes each line into at most one text fragment.

use crate::types::{LineOutcome, StreamChunk};
use crate::Error;
use futures_util::{Stream, StreamExt};
use memchr::memchr;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::mem;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// Prefix of every payload line.
pub const DATA_PREFIX: &str = "data: ";

/// Payload that marks the end of the stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Longest line we are willing to buffer.
const MAX_LINE_BYTES: usize = 1_000_000;

/// A stream adapter that splits a byte stream into lines.
/// Maintains internal state to handle lines split across chunks.
pub struct LineStream<S> {
    /// The underlying byte stream
    inner: S,
    /// Bytes of the current, not yet terminated line
    buffer: Vec<u8>,
    /// Complete lines ready to be yielded
    lines: VecDeque<Vec<u8>>,
    /// Error to report once the queued lines are drained
    pending_error: Option<Error>,
    /// Set once the inner stream is exhausted or failed
    finished: bool,
}

impl<S> LineStream<S> {
    /// Create a new line stream from a byte stream.
    pub fn new(stream: S) -> Self {
        Self {
            inner: stream,
            buffer: Vec::new(),
            lines: VecDeque::new(),
            pending_error: None,
            finished: false,
        }
    }

    /// Move every complete line out of the buffer.
    fn split_lines(&mut self) {
        let mut start = 0;

        while let Some(pos) = memchr(b'\n', &self.buffer[start..]) {
            let end = start + pos;
            self.lines
                .push_back(strip_carriage_return(&self.buffer[start..end]).to_vec());
            start = end + 1;
        }

        if start > 0 {
            self.buffer.drain(..start);
        }
    }
}

fn strip_carriage_return(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

impl<S, E> Stream for LineStream<S>
where
    S: Stream<Item = Result<bytes::Bytes, E>> + Unpin,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    type Item = Result<Vec<u8>, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(line) = self.lines.pop_front() {
                return Poll::Ready(Some(Ok(line)));
            }

            if let Some(error) = self.pending_error.take() {
                return Poll::Ready(Some(Err(error)));
            }

            if self.finished {
                return Poll::Ready(None);
            }

            match ready!(self.inner.poll_next_unpin(cx)) {
                Some(Ok(chunk)) => {
                    self.buffer.extend_from_slice(&chunk);
                    self.split_lines();

                    if self.buffer.len() > MAX_LINE_BYTES {
                        self.buffer.clear();
                        self.finished = true;
                        self.pending_error = Some(Error::streaming(format!(
                            "stream line exceeded {MAX_LINE_BYTES} bytes"
                        )));
                    }
                }
                Some(Err(e)) => {
                    self.buffer.clear();
                    self.finished = true;
                    return Poll::Ready(Some(Err(Error::streaming(format!(
                        "Stream error: {}",
                        e.into()
                    )))));
                }
                None => {
                    // The last line may not end with a newline.
                    self.finished = true;
                    if !self.buffer.is_empty() {
                        let line = mem::take(&mut self.buffer);
                        self.lines
                            .push_back(strip_carriage_return(&line).to_vec());
                    }
                }
            }
        }
    }
}

/// Decode one line of a streaming body.
///
/// Lines without the `data: ` prefix and payloads that are not valid JSON are
/// skipped. Only a line that is not valid UTF-8 is an error.
pub fn decode_line<C: StreamChunk>(line: &[u8]) -> Result<LineOutcome, Error> {
    if line.is_empty() {
        return Ok(LineOutcome::Skip);
    }

    let text = std::str::from_utf8(line)
        .map_err(|e| Error::streaming(format!("Invalid UTF-8 in stream line: {e}")))?;

    let Some(payload) = text.strip_prefix(DATA_PREFIX) else {
        tracing::trace!(line = text, "skipping non-data stream line");
        return Ok(LineOutcome::Skip);
    };

    if payload.trim() == DONE_SENTINEL {
        return Ok(LineOutcome::Done);
    }

    match serde_json::from_str::<C>(payload) {
        Ok(chunk) => Ok(match chunk.into_text() {
            Some(text) if !text.is_empty() => LineOutcome::Fragment(text),
            _ => LineOutcome::Skip,
        }),
        Err(error) => {
            tracing::trace!(%error, "skipping malformed stream chunk");
            Ok(LineOutcome::Skip)
        }
    }
}

/// A stream of text fragments decoded from a streaming body.
///
/// The underlying byte stream is dropped as soon as the sentinel, the end of
/// the body or an error is reached, so nothing after `[DONE]` is ever read.
pub struct FragmentStream<S, C> {
    lines: Option<LineStream<S>>,
    _chunk: PhantomData<fn() -> C>,
}

impl<S, C> FragmentStream<S, C> {
    pub fn new(stream: S) -> Self {
        Self {
            lines: Some(LineStream::new(stream)),
            _chunk: PhantomData,
        }
    }
}

impl<S, E, C> Stream for FragmentStream<S, C>
where
    S: Stream<Item = Result<bytes::Bytes, E>> + Unpin,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
    C: StreamChunk,
{
    type Item = Result<String, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            let Some(lines) = self.lines.as_mut() else {
                return Poll::Ready(None);
            };

            let outcome = match ready!(lines.poll_next_unpin(cx)) {
                Some(Ok(line)) => decode_line::<C>(&line),
                Some(Err(e)) => Err(e),
                None => Ok(LineOutcome::Done),
            };

            match outcome {
                Ok(LineOutcome::Fragment(text)) => return Poll::Ready(Some(Ok(text))),
                Ok(LineOutcome::Skip) => continue,
                Ok(LineOutcome::Done) => {
                    self.lines = None;
                    return Poll::Ready(None);
                }
                Err(e) => {
                    self.lines = None;
                    return Poll::Ready(Some(Err(e)));
                }
            }
        }
    }
}

/// Extension trait to add line and fragment decoding to byte streams.
pub trait SseStreamExt: Stream {
    /// Split this byte stream into lines.
    fn sse_lines(self) -> LineStream<Self>
    where
        Self: Sized,
    {
        LineStream::new(self)
    }

    /// Decode this byte stream into text fragments using chunk type `C`.
    fn text_fragments<C: StreamChunk>(self) -> FragmentStream<Self, C>
    where
        Self: Sized,
    {
        FragmentStream::new(self)
    }
}

impl<S: Stream> SseStreamExt for S {}
