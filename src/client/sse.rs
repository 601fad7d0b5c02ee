//! Server-Sent Events (SSE) decoding for A2A streaming responses.
//!
//! [`SseDecoder`] is the incremental framer: it accepts raw body chunks of
//! any size (including chunks that split a multi-byte character), splits the
//! text on blank lines, and parses every `data: ` line as a JSON-RPC
//! response. [`EventStream`] drives a decoder from a live response body and
//! types each result as a [`StreamEvent`].

use std::collections::VecDeque;
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::Stream;
use serde_json::Value;

use crate::error::{A2AError, A2AResult};
use crate::types::{JsonRpcResponse, StreamEvent};

use super::transport::ByteStream;

/// Frame delimiter: one blank line.
const FRAME_DELIMITER: &str = "\n\n";

/// Prefix of a payload line.
const DATA_PREFIX: &str = "data: ";

/// Incremental UTF-8 decoder.
///
/// Holds back a trailing incomplete multi-byte sequence until the next chunk
/// completes it. Invalid sequences decode to U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    /// Create a decoder with no buffered bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `chunk`, returning every character it completes.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let mut out = String::new();
        let mut input = self.pending.as_slice();
        loop {
            match std::str::from_utf8(input) {
                Ok(valid) => {
                    out.push_str(valid);
                    input = &[];
                    break;
                }
                Err(e) => {
                    let (valid, rest) = input.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            input = &rest[len..];
                        }
                        // Truncated sequence at the end: wait for more bytes.
                        None => {
                            input = rest;
                            break;
                        }
                    }
                }
            }
        }

        let rest = input.to_vec();
        self.pending = rest;
        out
    }

    /// Number of bytes held back waiting for the rest of a character.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Flush: any held-back bytes can no longer complete a character.
    pub fn finish(&mut self) -> String {
        let rest = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&rest).into_owned()
    }
}

/// Incremental SSE framer for JSON-RPC streaming responses.
///
/// Feed it chunks with [`feed()`](Self::feed); it returns the `result` of
/// every complete frame's `data:` lines, in order. The first malformed
/// payload is returned as an `Err` and poisons the decoder: nothing is ever
/// yielded after it.
#[derive(Debug, Default)]
pub struct SseDecoder {
    utf8: Utf8Decoder,
    buffer: String,
    failed: bool,
}

impl SseDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `chunk` and decode every frame it completes.
    ///
    /// The returned items are in frame order. An `Err`, if present, is the
    /// last item.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<A2AResult<Value>> {
        let mut out = Vec::new();
        if self.failed {
            return out;
        }

        let text = self.utf8.decode(chunk);
        self.buffer.push_str(&text);

        while let Some(end) = self.buffer.find(FRAME_DELIMITER) {
            let frame: String = self.buffer.drain(..end + FRAME_DELIMITER.len()).collect();
            let frame = &frame[..end];

            for payload in data_payloads(frame) {
                match parse_payload(payload) {
                    Ok(Some(result)) => out.push(Ok(result)),
                    Ok(None) => {}
                    Err(e) => {
                        self.failed = true;
                        self.buffer.clear();
                        out.push(Err(e));
                        return out;
                    }
                }
            }
        }

        out
    }

    /// Signal end of input. Any incomplete trailing frame is discarded.
    ///
    /// Returns the number of bytes dropped.
    pub fn finish(&mut self) -> usize {
        let dropped = self.buffer.len() + self.utf8.finish().len();
        self.buffer.clear();
        dropped
    }

    /// Whether a malformed payload has been seen.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Bytes of text buffered for an incomplete frame.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }
}

/// The payloads of every `data: ` line in a frame. Other lines (comments,
/// `event:`, `id:`, `retry:`) are ignored.
fn data_payloads(frame: &str) -> impl Iterator<Item = &str> {
    frame
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter_map(|line| line.strip_prefix(DATA_PREFIX))
}

/// Parse one payload as a JSON-RPC response and unwrap its result.
fn parse_payload(data: &str) -> A2AResult<Option<Value>> {
    let response: JsonRpcResponse = serde_json::from_str(data)
        .map_err(|e| A2AError::decode(format!("Failed to parse SSE data: {e}")))?;

    if let Some(error) = &response.error {
        tracing::warn!(
            code = error.code,
            message = %error.message,
            "skipping JSON-RPC error frame in event stream"
        );
    }

    Ok(response.into_result())
}

/// A pull-driven stream of A2A events from one streaming response.
///
/// Nothing runs in the background: the body is read only while the consumer
/// polls. The stream ends when the server closes the body or sends a final
/// status update; the first error is the last item. The response body is
/// dropped as soon as the stream ends, on [`close()`](Self::close), or when
/// the `EventStream` itself is dropped.
///
/// # Example
///
/// ```no_run
/// # async fn example(mut stream: a2a_rpc_client::client::EventStream) {
/// while let Some(event) = stream.next().await {
///     match event {
///         Ok(event) => println!("Got event: {:?}", event),
///         Err(e) => eprintln!("Stream error: {}", e),
///     }
/// }
/// # }
/// ```
pub struct EventStream {
    body: Option<ByteStream>,
    decoder: SseDecoder,
    ready: VecDeque<A2AResult<Value>>,
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("open", &self.body.is_some())
            .field("ready", &self.ready.len())
            .finish_non_exhaustive()
    }
}

impl EventStream {
    /// Decode events from a response body.
    pub fn new(body: ByteStream) -> Self {
        Self {
            body: Some(body),
            decoder: SseDecoder::new(),
            ready: VecDeque::new(),
        }
    }

    /// Get the next event.
    ///
    /// Returns `None` once the stream has ended.
    pub async fn next(&mut self) -> Option<A2AResult<StreamEvent>> {
        futures::future::poll_fn(|cx| Pin::new(&mut *self).poll_next(cx)).await
    }

    /// Stop consuming and release the response body.
    ///
    /// Events already decoded but not yet taken are discarded.
    pub fn close(&mut self) {
        self.ready.clear();
        self.release("closed by consumer");
    }

    /// Whether the response body is still held.
    pub fn is_open(&self) -> bool {
        self.body.is_some()
    }

    fn release(&mut self, why: &str) {
        if self.body.take().is_some() {
            tracing::debug!(reason = why, "released event stream body");
        }
    }

    /// End the stream with `err` as its last item.
    fn fail(&mut self, err: A2AError) -> Poll<Option<A2AResult<StreamEvent>>> {
        self.ready.clear();
        self.release("error");
        Poll::Ready(Some(Err(err)))
    }
}

impl Stream for EventStream {
    type Item = A2AResult<StreamEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(item) = this.ready.pop_front() {
                let event = item.and_then(|value| {
                    serde_json::from_value::<StreamEvent>(value).map_err(|e| {
                        A2AError::decode(format!("Failed to parse SSE event: {e}"))
                    })
                });
                return match event {
                    Ok(event) => {
                        if event.is_final() {
                            this.ready.clear();
                            this.release("final event");
                        }
                        Poll::Ready(Some(Ok(event)))
                    }
                    Err(e) => this.fail(e),
                };
            }

            let Some(body) = this.body.as_mut() else {
                return Poll::Ready(None);
            };

            match body.as_mut().poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(chunk))) => {
                    this.ready.extend(this.decoder.feed(&chunk));
                }
                Poll::Ready(Some(Err(e))) => return this.fail(e),
                Poll::Ready(None) => {
                    let dropped = this.decoder.finish();
                    if dropped > 0 {
                        tracing::debug!(bytes = dropped, "discarding incomplete trailing frame");
                    }
                    this.release("end of body");
                }
            }
        }
    }
}
