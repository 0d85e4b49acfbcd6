use std::io::{self, Write};

use futures_util::StreamExt;
use tracing::{debug, trace};

use crate::completion::FragmentStream;
use crate::error::ChainError;

/// Destination for streamed answer text.
pub trait FragmentSink {
    fn write_fragment(&mut self, fragment: &str) -> io::Result<()>;
}

/// Writes each fragment to `W` and flushes it, so partial answers show up
/// on a terminal as they arrive.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FragmentSink for WriterSink<W> {
    fn write_fragment(&mut self, fragment: &str) -> io::Result<()> {
        self.writer.write_all(fragment.as_bytes())?;
        self.writer.flush()
    }
}

impl FragmentSink for Vec<String> {
    fn write_fragment(&mut self, fragment: &str) -> io::Result<()> {
        self.push(fragment.to_string());
        Ok(())
    }
}

/// Forwards every fragment to `sink` in arrival order and returns how many
/// were forwarded.
///
/// The first error from the stream is returned unchanged; fragments already
/// written stay written.
pub async fn relay<S>(mut stream: FragmentStream, sink: &mut S) -> Result<usize, ChainError>
where
    S: FragmentSink + ?Sized,
{
    let mut forwarded = 0;
    while let Some(fragment) = stream.next().await {
        let fragment = fragment?;
        sink.write_fragment(&fragment)?;
        forwarded += 1;
        trace!(forwarded, "fragment relayed");
    }
    debug!(fragments = forwarded, "stream complete");
    Ok(forwarded)
}
