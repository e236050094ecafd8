use anyhow::{Context, Result};
use clap::Args;
use std::io::Read;
use std::path::PathBuf;

use crate::client::session::{Phase, Session};
use crate::client::SummarizeClient;
use crate::models::DEFAULT_TEMPERATURE;
use crate::pipeline::cost::{self, Estimate};
use crate::pipeline::ingest::{self, IngestOutcome};

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Article text to summarize
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the article from a .txt file (.pdf/.docx are recognized but not extracted)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Sampling temperature between 0 and 1
    #[arg(short, long, default_value_t = DEFAULT_TEMPERATURE, value_parser = parse_temperature)]
    pub temperature: f64,

    /// Base URL of a running summarizer server
    #[arg(long, env = "SUMMARIZER_URL", default_value = "http://localhost:3000")]
    pub url: String,
}

fn parse_temperature(raw: &str) -> Result<f64, String> {
    let t: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if (0.0..=1.0).contains(&t) {
        Ok(t)
    } else {
        Err("temperature must be between 0 and 1".into())
    }
}

/// Resolve the article text from `--text`, `--file` or stdin.
pub async fn read_input(args: &InputArgs) -> Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }

    if let Some(path) = &args.file {
        return match ingest::ingest_path(path)
            .await
            .with_context(|| format!("could not load {}", path.display()))?
        {
            IngestOutcome::Text { text, .. } => Ok(text),
            IngestOutcome::Unsupported { message, .. } => anyhow::bail!(message),
        };
    }

    tokio::task::spawn_blocking(|| {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read article from stdin")?;
        Ok::<_, anyhow::Error>(buf)
    })
    .await?
}

pub fn render_estimate(estimate: &Estimate) -> String {
    format!(
        "Input tokens:   {}\nOutput tokens:  ~{}\nEstimated cost: {}",
        estimate.input_tokens,
        estimate.output_tokens,
        cost::format_usd(estimate.cost_usd)
    )
}

pub async fn estimate(args: InputArgs) -> Result<()> {
    let text = read_input(&args).await?;
    println!("{}", render_estimate(&cost::estimate(&text)));
    Ok(())
}

/// Returns `false` when the summary could not be produced.
pub async fn summarize(args: SummarizeArgs) -> Result<bool> {
    let text = read_input(&args.input).await?;
    let client = SummarizeClient::new(&args.url);
    let mut session = Session::default();
    session.set_temperature(args.temperature);
    session.set_text(text);

    println!("{}", render_estimate(&session.estimate()));
    println!();
    tracing::debug!(
        endpoint = client.endpoint(),
        chars = session.text().chars().count(),
        "submitting article"
    );

    match session.submit(&client).await? {
        Phase::Success(resp) => {
            println!("{}", resp.summary);
            println!();
            println!("Total tokens: {}", resp.usage.total_tokens);
            println!("Actual cost:  {}", cost::format_usd(cost::actual_cost(&resp.usage)));
            Ok(true)
        }
        Phase::Error(message) => {
            eprintln!("error: {message}");
            Ok(false)
        }
        other => anyhow::bail!("session did not settle: {:?}", other),
    }
}
