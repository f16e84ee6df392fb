// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses command line arguments with clap and hands off to the
// application layer. The only printing in the crate lives here.
//
//   `build-vocab` — build and save a train-split vocabulary
//   `inspect`     — summarise datasets, print one example
//
// Reference: Rust Book §12 (Building a CLI Program)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{BuildVocabArgs, Commands, InspectArgs};

#[derive(Parser, Debug)]
#[command(
    name = "squad-qa",
    version,
    about = "Load SQuAD1/SQuAD2 as token-encoded question-answer datasets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::BuildVocab(args) => run_build_vocab(args),
            Commands::Inspect(args)    => run_inspect(args),
        }
    }
}

fn run_build_vocab(args: BuildVocabArgs) -> Result<()> {
    use crate::application::vocab_use_case::BuildVocabUseCase;

    let out = args.out.clone();
    let use_case = BuildVocabUseCase::new(args.corpus.into_config()?, &out);
    let size = use_case.execute()?;

    println!("Vocabulary with {} entries written to {}", size, out.display());
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::application::inspect_use_case::InspectUseCase;

    let index = args.index;
    let use_case = InspectUseCase::new(args.into_config()?, index);
    let report = use_case.execute()?;

    println!("{} — vocab size {}", report.version, report.vocab_size);
    for s in &report.splits {
        println!("  {:<5} {} examples", s.split, s.examples);
    }
    if let Some(sample) = &report.sample {
        println!("\nExample {}:", index);
        println!("{}", serde_json::to_string_pretty(sample)?);
    }
    Ok(())
}
