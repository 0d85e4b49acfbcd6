use std::io::{stdin, stdout, Write};

use anyhow::Result;
use clap::Parser;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ina_sql_prompter::{
    Chain, ChainError, ClientConfig, Credential, RunOutcome, TextToSqlChain, WriterSink,
    DEFAULT_BASE_URL, MODEL, SCHEMA_VERSION,
};

const PLACEHOLDER: &str = "Can you give me a top conditions reported by patients?";
const KEY_HINT: &str = "Please add your OpenAI API key to continue. \
You can get one at https://platform.openai.com/account/api-keys";

#[derive(Parser)]
#[command(name = "ina-sql")]
#[command(author, version, about = "Ask questions about the INA data and get SQL back", long_about = None)]
struct Cli {
    #[arg(short, long)]
    verbose: bool,

    /// OpenAI-compatible API root
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Ask a single question and exit
    question: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let chain = TextToSqlChain::openai(&ClientConfig {
        base_url: cli.base_url,
    });
    info!(model = MODEL, schema = SCHEMA_VERSION, "Data Query ready");

    // .env / environment is only a convenience; without it the key is typed in.
    let mut api_key = match std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|key| Credential::new(key.as_str()).is_some())
    {
        Some(key) => key,
        None => prompt_api_key()?,
    };

    if let Some(question) = cli.question {
        let mut sink = WriterSink::new(stdout());
        if chain.run(&api_key, &question, &mut sink).await? == RunOutcome::Skipped {
            eprintln!("Nothing to ask.");
        } else {
            println!();
        }
        return Ok(());
    }

    loop {
        print!("\nNow ask a question about the data! (e.g. \"{PLACEHOLDER}\")\n> ");
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let question = input.trim_end_matches(|c: char| c == '\n' || c == '\r');
        if matches!(question.trim(), "exit" | "quit") {
            break;
        }

        let mut sink = WriterSink::new(stdout());
        match chain.run(&api_key, question, &mut sink).await {
            Ok(RunOutcome::Skipped) => {}
            Ok(RunOutcome::Streamed { .. }) => println!(),
            Err(ChainError::MissingCredential) => api_key = prompt_api_key()?,
            Err(e @ ChainError::Authentication(_)) => {
                println!();
                eprintln!("{e}");
                api_key = prompt_api_key()?;
            }
            Err(e) => {
                println!();
                eprintln!("{e}");
            }
        }
    }

    Ok(())
}

fn prompt_api_key() -> Result<String> {
    loop {
        let key = rpassword::prompt_password("OpenAI API Key: ")?;
        if Credential::new(key.as_str()).is_some() {
            return Ok(key);
        }
        eprintln!("{KEY_HINT}");
    }
}
