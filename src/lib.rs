pub mod chain;
pub mod completion;
pub mod composer;
pub mod credential;
pub mod error;
pub mod relay;
pub mod schema;
pub mod text_to_sql_chain;

pub use chain::{Chain, RunOutcome};
pub use completion::{
    ClientConfig, CompletionClient, FragmentStream, OpenAiClient, DEFAULT_BASE_URL, MODEL,
};
pub use composer::{compose_prompt, Question};
pub use credential::Credential;
pub use error::ChainError;
pub use relay::{relay, FragmentSink, WriterSink};
pub use schema::{QUESTION_SEPARATOR, SCHEMA_PROMPT, SCHEMA_VERSION};
pub use text_to_sql_chain::TextToSqlChain;
