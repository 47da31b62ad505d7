use anyhow::Result;
use chatx_config::{Config, ConfigSource};
use chatx_engine::{Pipeline, RunReport};
use chatx_tokens::Resolved;

use crate::cli::ExtractArgs;

pub fn handle(args: ExtractArgs) -> Result<()> {
    let (config, _) = prepare(&args)?;

    let resolved = chatx_tokens::resolve(&config.encoding);
    if let Some(notice) = tokenizer_notice(&resolved) {
        eprintln!("{}", notice);
    }

    let pipeline = Pipeline::new(config.author.clone(), resolved.estimator);
    let report = pipeline.run(&config.input, &config.output)?;

    print_report(&config, &report);
    Ok(())
}

/// Load config, apply flag overrides, and check the result can drive a run
fn prepare(args: &ExtractArgs) -> Result<(Config, ConfigSource)> {
    let (config, source) = Config::discover(args.config.as_deref())?;
    tracing::debug!(config = %source, "Loaded config");

    let config = merge(config, args);
    config.validate(&source)?;
    Ok((config, source))
}

/// Flags win over config values
fn merge(mut config: Config, args: &ExtractArgs) -> Config {
    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(author) = &args.author {
        config.author = author.clone();
    }
    if let Some(encoding) = &args.encoding {
        config.encoding = encoding.clone();
    }
    config
}

fn tokenizer_notice(resolved: &Resolved) -> Option<String> {
    resolved.fallback_reason.as_ref().map(|reason| {
        format!(
            "⚠ Tokenizer unavailable: {}\n  Token count will be approximate (chars / 4)",
            reason
        )
    })
}

fn print_report(config: &Config, report: &RunReport) {
    println!(
        "✓ Saved {} message(s) from {} to {}",
        report.stats.selected,
        config.author,
        report.output.display()
    );
    if report.stats.empty > 0 {
        println!("  Messages without text: {}", report.stats.empty);
    }
    println!("  Characters: {}", report.chars);
    if report.strategy.is_exact() {
        println!("  Tokens: {} ({})", report.tokens, report.strategy);
    } else {
        println!("  Tokens: ~{} ({})", report.tokens, report.strategy);
    }
    println!("  Hash: {}", report.blob_hash);
}
