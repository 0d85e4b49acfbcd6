//! Server-sent events decoding for streamed chat completions.
//!
//! The service sends one `data:` event per chunk and a final `data: [DONE]`.
//! Network reads do not line up with event boundaries, so bytes are buffered
//! until a full line is available.

use std::collections::VecDeque;
use std::fmt;
use std::pin::Pin;

use futures_util::{stream, Stream, StreamExt};
use serde::Deserialize;

use super::FragmentStream;
use crate::error::ChainError;

const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    Fragment(String),
    Done,
}

#[derive(Deserialize)]
struct ChunkPayload {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    error: Option<ApiErrorBody>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Deserialize, Default)]
struct ChunkDelta {
    content: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ApiErrorBody {
    pub(crate) message: String,
}

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    data: Vec<String>,
    done: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the completion marker has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feeds raw bytes and returns every frame they complete.
    pub fn push(&mut self, bytes: &[u8]) -> Result<Vec<SseFrame>, ChainError> {
        self.buffer.extend_from_slice(bytes);

        let mut frames = Vec::new();
        while !self.done {
            let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') else {
                break;
            };
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = decode_line(&line)?;
            if let Some(frame) = self.feed_line(&line)? {
                frames.push(frame);
            }
        }
        Ok(frames)
    }

    /// Flushes an unterminated last line and any event still being assembled.
    pub fn finish(&mut self) -> Result<Vec<SseFrame>, ChainError> {
        let mut frames = Vec::new();
        if self.done {
            return Ok(frames);
        }
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            let line = decode_line(&rest)?;
            if let Some(frame) = self.feed_line(&line)? {
                frames.push(frame);
            }
        }
        if !self.done {
            if let Some(frame) = self.dispatch()? {
                frames.push(frame);
            }
        }
        Ok(frames)
    }

    fn feed_line(&mut self, line: &str) -> Result<Option<SseFrame>, ChainError> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return Ok(None);
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data.push(value.to_string());
        }
        Ok(None)
    }

    fn dispatch(&mut self) -> Result<Option<SseFrame>, ChainError> {
        if self.data.is_empty() {
            return Ok(None);
        }
        let payload = self.data.join("\n");
        self.data.clear();

        if payload.trim() == DONE_MARKER {
            self.done = true;
            return Ok(Some(SseFrame::Done));
        }
        parse_chunk(&payload)
    }
}

fn decode_line(raw: &[u8]) -> Result<String, ChainError> {
    let line = std::str::from_utf8(raw)
        .map_err(|e| ChainError::request(format!("stream is not valid UTF-8: {e}")))?;
    let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
    Ok(line.to_string())
}

fn parse_chunk(payload: &str) -> Result<Option<SseFrame>, ChainError> {
    let chunk: ChunkPayload = serde_json::from_str(payload)
        .map_err(|e| ChainError::request(format!("malformed stream chunk: {e}")))?;

    if let Some(error) = chunk.error {
        return Err(ChainError::request(error.message));
    }

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty())
        .map(SseFrame::Fragment))
}

struct DecodeState<S> {
    body: Pin<Box<S>>,
    decoder: SseDecoder,
    pending: VecDeque<Result<String, ChainError>>,
    finished: bool,
    failed: bool,
}

impl<S> DecodeState<S> {
    fn absorb(&mut self, frames: Result<Vec<SseFrame>, ChainError>) {
        match frames {
            Ok(frames) => {
                for frame in frames {
                    match frame {
                        SseFrame::Fragment(text) => self.pending.push_back(Ok(text)),
                        SseFrame::Done => self.finished = true,
                    }
                }
            }
            Err(e) => {
                self.pending.push_back(Err(e));
                self.failed = true;
                self.finished = true;
            }
        }
    }
}

/// Turns a raw response body into a stream of text fragments.
///
/// The stream ends after `[DONE]`. A transport error, a malformed chunk or a
/// body that closes before `[DONE]` yields one error item and then ends.
pub fn decode_fragments<S, B, E>(body: S) -> FragmentStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    let state = DecodeState {
        body: Box::pin(body),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
        failed: false,
    };

    Box::pin(stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((item, state));
            }
            if state.finished {
                return None;
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let frames = state.decoder.push(chunk.as_ref());
                    state.absorb(frames);
                }
                Some(Err(e)) => {
                    state.finished = true;
                    let err = ChainError::request(format!("stream interrupted: {e}"));
                    return Some((Err(err), state));
                }
                None => {
                    let frames = state.decoder.finish();
                    state.absorb(frames);
                    state.finished = true;
                    if !state.decoder.is_done() && !state.failed {
                        state.pending.push_back(Err(ChainError::request(
                            "stream closed before the model finished",
                        )));
                    }
                }
            }
        }
    }))
}
