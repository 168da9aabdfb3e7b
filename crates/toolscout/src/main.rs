use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use toolscout::Pipeline;
use toolscout_core::RunState;
use toolscout_local::{FirecrawlClient, OpenAiCompatClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "toolscout")]
#[command(about = "Research a developer tool and its alternatives", long_about = None)]
struct Cli {
    /// Tool or technology to research (e.g. "langchain").
    query: String,

    /// Chat model id (overrides TOOLSCOUT_OPENAI_COMPAT_MODEL).
    #[arg(long)]
    model: Option<String>,

    /// Comparison articles to pull when discovering alternatives.
    #[arg(long, default_value_t = 3)]
    articles: usize,
}

fn print_report(state: &RunState) {
    println!("Researched {} tool(s) for \"{}\"\n", state.companies.len(), state.query);

    for (i, record) in state.companies.iter().enumerate() {
        println!("{}. {}", i + 1, record.name);
        if let Some(website) = &record.website {
            println!("   website: {website}");
        }
        println!("   pricing: {:?}", record.pricing_model);
        match record.is_open_source {
            Some(true) => println!("   open source: yes"),
            Some(false) => println!("   open source: no"),
            None => {}
        }
        if let Some(api) = record.api_available {
            println!("   api available: {}", if api { "yes" } else { "no" });
        }
        if !record.tech_stack.is_empty() {
            println!("   tech stack: {}", record.tech_stack.join(", "));
        }
        if !record.language_support.is_empty() {
            println!("   languages: {}", record.language_support.join(", "));
        }
        if !record.integration_capabilities.is_empty() {
            println!(
                "   integrations: {}",
                record.integration_capabilities.join(", ")
            );
        }
        if !record.description.is_empty() {
            println!("   {}", record.description);
        }
        println!();
    }

    if let Some(analysis) = &state.analysis {
        println!("Recommendation:\n{analysis}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = reqwest::Client::builder()
        .user_agent("toolscout/0.1")
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(120))
        .build()?;

    let firecrawl = FirecrawlClient::from_env(client.clone())?;
    let model = OpenAiCompatClient::from_env(client, cli.model);

    let pipeline =
        Pipeline::new(firecrawl, model).with_article_search_limit(cli.articles.max(1));
    let state = pipeline.run(&cli.query).await?;

    print_report(&state);
    Ok(())
}
