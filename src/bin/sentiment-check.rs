//! Sentiment check
//!
//! Scores review text with the same lexicon the loader uses and prints the
//! polarity, the derived label and the words that contributed.
//!
//! Usage:
//!   sentiment-check "Food was amazing but service was slow"
//!   cat reviews.txt | sentiment-check

use clap::Parser;
use std::io::{self, BufRead};

use voice_of_dine::domain::Sentiment;
use voice_of_dine::pipeline::sentiment::LexiconScorer;

#[derive(Parser)]
#[command(name = "sentiment-check")]
#[command(about = "Score review text with the review lexicon")]
struct Args {
    /// Review texts; lines from stdin are scored when none are given
    texts: Vec<String>,

    /// Print only the label
    #[arg(long)]
    quiet: bool,
}

fn check(scorer: &LexiconScorer, text: &str, quiet: bool) {
    let report = scorer.analyze(text);
    let label = Sentiment::from_polarity(report.polarity);
    if quiet {
        println!("{}", label);
        return;
    }

    println!("📝 {}", text);
    println!("   Polarity: {:+.3}", report.polarity);
    println!("   Sentiment: {}", label);
    if !report.scored.is_empty() {
        let words: Vec<String> = report
            .scored
            .iter()
            .map(|t| format!("{} ({:+.2})", t.token, t.score))
            .collect();
        println!("   Scored words: {}", words.join(", "));
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let scorer = LexiconScorer::new();

    if args.texts.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            if !line.trim().is_empty() {
                check(&scorer, &line, args.quiet);
            }
        }
    } else {
        for text in &args.texts {
            check(&scorer, text, args.quiet);
        }
    }
    Ok(())
}
