use anyhow::Context;
use colored::Colorize;
use kith_recommend::{rank, reason_for_match, MatchReason};
use kith_server::{KithConfig, KithServer};
use kith_types::MemberId;
use serde_json::json;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::CheckConfig(args) => cmd_check_config(args, &cli.format),
        Command::Rank(args) => cmd_rank(args, &cli.format),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => KithConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => KithConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    config.validate()?;
    tracing::debug!(?config, "resolved configuration");

    println!("Kith server on {}", config.server.bind_addr.to_string().bold());
    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(KithServer::new(config).serve())?;
    Ok(())
}

fn cmd_check_config(args: CheckConfigArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = KithConfig::load(&args.path)
        .with_context(|| format!("checking {}", args.path.display()))?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => {
            println!("{} {} is valid", "✓".green().bold(), args.path.display());
            println!("  Bind: {}", config.server.bind_addr.to_string().cyan());
            println!(
                "  Page size: {} (max {})",
                config.recommend.default_page_size, config.recommend.max_page_size
            );
        }
    }
    Ok(())
}

fn cmd_rank(args: RankArgs, format: &OutputFormat) -> anyhow::Result<()> {
    if args.page_size == 0 {
        anyhow::bail!("--page-size must be positive");
    }
    let a = parse_members(&args.a)?;
    let b = parse_members(&args.b)?;
    let pages = preview(&a, &b, args.page_size);

    match format {
        OutputFormat::Json => {
            let pages: Vec<_> = pages
                .iter()
                .map(|page| {
                    page.iter()
                        .map(|(member, reason)| json!({ "member": member, "reason": reason }))
                        .collect::<Vec<_>>()
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "pages": pages }))?);
        }
        OutputFormat::Text => {
            if pages.is_empty() {
                println!("No candidates.");
            }
            for (i, page) in pages.iter().enumerate() {
                println!("{}", format!("Page {}", i + 1).bold());
                for (member, reason) in page {
                    println!("  {} {}", member.to_string().yellow(), label(*reason));
                }
            }
        }
    }
    Ok(())
}

/// Rank `a` and `b` and cut the result into pages with each candidate's
/// reason attached.
fn preview(a: &[MemberId], b: &[MemberId], page_size: usize) -> Vec<Vec<(MemberId, MatchReason)>> {
    let ranked: Vec<(MemberId, MatchReason)> = rank(a, b)
        .into_iter()
        .filter_map(|m| reason_for_match(&m, a, b).map(|r| (m, r)))
        .collect();
    ranked.chunks(page_size).map(<[_]>::to_vec).collect()
}

fn label(reason: MatchReason) -> colored::ColoredString {
    match reason {
        MatchReason::Both => "both".green(),
        MatchReason::OnlyA => "only a".cyan(),
        MatchReason::OnlyB => "only b".blue(),
    }
}

/// Accept full UUIDs, or small integers as shorthand for fixture ids.
fn parse_member(raw: &str) -> anyhow::Result<MemberId> {
    if let Ok(n) = raw.trim().parse::<u128>() {
        return Ok(MemberId::from_u128(n));
    }
    Ok(MemberId::parse(raw)?)
}

fn parse_members(raw: &[String]) -> anyhow::Result<Vec<MemberId>> {
    raw.iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_member(s))
        .collect()
}
