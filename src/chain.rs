use async_trait::async_trait;

use crate::error::ChainError;
use crate::relay::FragmentSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Empty question; nothing was sent.
    Skipped,
    Streamed { fragments: usize },
}

#[async_trait]
pub trait Chain {
    /// Runs one question through the pipeline, streaming the answer into `sink`.
    async fn run(
        &self,
        credential: &str,
        question: &str,
        sink: &mut (dyn FragmentSink + Send),
    ) -> Result<RunOutcome, ChainError>;
}
