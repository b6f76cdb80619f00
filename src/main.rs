//! smt2hr CLI — SMT-LIB assertion prettifier/translator.

use anyhow::{Context, Result};
use clap::Parser;
use smt2hr::frontend::{self, Script};
use smt2hr::rewriter::rewrite;
use smt2hr::stringify::render;
use smt2hr::token::Token;
use smt2hr::translator::{ExpressionTranslator, DEFAULT_ARRAY_WIDTH};
use std::io::{IsTerminal, Read};

#[derive(Parser, Debug)]
#[command(
    name = "smt2hr",
    version,
    about = "Convert bitvector SMT-LIB assertions to a human-readable form"
)]
struct Cli {
    /// Path to an .smt2 file. Reads stdin when omitted.
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Output mode: translate (default) or pretty.
    #[arg(short, long, default_value = "translate")]
    mode: String,

    /// Output format: text (default) or json.
    #[arg(short = 'o', long, default_value = "text")]
    format: String,

    /// Bit-width assumed for selected arrays.
    #[arg(long, default_value_t = DEFAULT_ARRAY_WIDTH)]
    width: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let source = if let Some(ref path) = cli.file {
        let mut buf = String::new();
        std::fs::File::open(path)
            .with_context(|| format!("failed to open {path}"))?
            .read_to_string(&mut buf)?;
        buf
    } else if std::io::stdin().is_terminal() {
        anyhow::bail!("no input provided — pass a file path or pipe a script to stdin");
    } else {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    };

    let script = frontend::parse_script(&source).context("failed to parse script")?;
    log::info!(
        "parsed {} assertions, {} declarations",
        script.assertions.len(),
        script.declarations.len()
    );

    let (lines, separator) = match cli.mode.as_str() {
        "pretty" => (pretty_lines(&script), "\n\n"),
        "translate" => (translate_lines(&script, cli.width)?, "\n"),
        other => anyhow::bail!("unknown mode: {other} (expected pretty or translate)"),
    };

    match cli.format.as_str() {
        "json" => {
            let mut doc = serde_json::json!({
                "mode": cli.mode,
                "assertions": lines,
            });
            if cli.mode == "pretty" {
                // Also expose the rewritten token trees for tooling.
                let terms: Vec<Vec<Token>> = script
                    .assertions
                    .iter()
                    .map(|t| rewrite(std::slice::from_ref(t)))
                    .collect();
                doc["terms"] = serde_json::to_value(&terms)?;
            }
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        _ => {
            if !lines.is_empty() {
                println!("{}", lines.join(separator));
            }
        }
    }

    Ok(())
}

/// Cosmetic rewrite of each assertion, labelled the way the original
/// dump format did.
fn pretty_lines(script: &Script) -> Vec<String> {
    script
        .assertions
        .iter()
        .map(|term| {
            let cleaned = render(&rewrite(std::slice::from_ref(term)));
            format!("assert :\t{cleaned}")
        })
        .collect()
}

/// Semantic translation, one infix line per assertion.  The first
/// malformed or unsupported assertion aborts the run.
fn translate_lines(script: &Script, width: u32) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(script.assertions.len());
    for term in &script.assertions {
        let mut translator = ExpressionTranslator::with_default_width(width);
        let text = translator.translate(term).with_context(|| {
            format!(
                "failed to translate assertion: {}",
                frontend::serialize_term(term)
            )
        })?;
        for (name, bits) in translator.variable_sizes().iter() {
            log::debug!("inferred width of {name}: {bits} bits");
        }
        lines.push(text);
    }
    Ok(lines)
}
