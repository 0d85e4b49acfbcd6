use async_trait::async_trait;
use tracing::{debug, info};

use crate::chain::{Chain, RunOutcome};
use crate::completion::{ClientConfig, CompletionClient, OpenAiClient};
use crate::composer::{compose_prompt, Question};
use crate::credential::Credential;
use crate::error::ChainError;
use crate::relay::{relay, FragmentSink};

pub struct TextToSqlChain<C> {
    client: C,
}

impl TextToSqlChain<OpenAiClient> {
    pub fn openai(config: &ClientConfig) -> Self {
        Self::new(OpenAiClient::new(config))
    }
}

impl<C: CompletionClient> TextToSqlChain<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: CompletionClient> Chain for TextToSqlChain<C> {
    async fn run(
        &self,
        credential: &str,
        question: &str,
        sink: &mut (dyn FragmentSink + Send),
    ) -> Result<RunOutcome, ChainError> {
        let credential = Credential::new(credential).ok_or(ChainError::MissingCredential)?;

        let Some(question) = Question::new(question) else {
            debug!("empty question, nothing to send");
            return Ok(RunOutcome::Skipped);
        };

        let prompt = compose_prompt(&question);
        info!(question_bytes = question.as_str().len(), "generating SQL answer");

        let fragments = self.client.stream(&credential, &prompt).await?;
        let fragments = relay(fragments, sink).await?;

        Ok(RunOutcome::Streamed { fragments })
    }
}
