use crate::models::{EstimateResponse, Usage};

/// gpt-4o-mini pricing, USD per 1000 tokens.
pub const INPUT_COST_PER_1K_TOKENS: f64 = 0.00015;
pub const OUTPUT_COST_PER_1K_TOKENS: f64 = 0.0006;

/// Tokens the fixed prompt template adds around the article.
pub const PROMPT_OVERHEAD_TOKENS: u64 = 20;
/// Same ceiling as the `max_tokens` sent to the provider.
pub const MAX_OUTPUT_TOKENS: u64 = 500;
const CHARS_PER_TOKEN: u64 = 4;
const OUTPUT_RATIO: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_usd: f64,
}

impl Estimate {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

impl From<Estimate> for EstimateResponse {
    fn from(e: Estimate) -> Self {
        EstimateResponse {
            input_tokens: e.input_tokens,
            output_tokens: e.output_tokens,
            total_tokens: e.total_tokens(),
            cost_usd: e.cost_usd,
            cost_display: format_usd(e.cost_usd),
        }
    }
}

/// Rough token count: one token per four characters, rounded up.
pub fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() as u64).div_ceil(CHARS_PER_TOKEN)
}

pub fn token_cost(input_tokens: u64, output_tokens: u64) -> f64 {
    (input_tokens as f64 / 1000.0) * INPUT_COST_PER_1K_TOKENS
        + (output_tokens as f64 / 1000.0) * OUTPUT_COST_PER_1K_TOKENS
}

/// Estimate prompt size, summary size and cost for summarizing `text`.
pub fn estimate(text: &str) -> Estimate {
    let content_tokens = estimate_tokens(text);
    let input_tokens = content_tokens + PROMPT_OVERHEAD_TOKENS;
    let output_tokens = MAX_OUTPUT_TOKENS.min((content_tokens as f64 * OUTPUT_RATIO).ceil() as u64);

    Estimate {
        input_tokens,
        output_tokens,
        cost_usd: token_cost(input_tokens, output_tokens),
    }
}

/// Price the usage the provider actually reported.
pub fn actual_cost(usage: &Usage) -> f64 {
    token_cost(usage.prompt_tokens, usage.completion_tokens)
}

pub fn format_usd(amount: f64) -> String {
    format!("${:.4}", amount)
}
