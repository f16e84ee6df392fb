// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands:
//   build-vocab — build a vocab from the train split, save it
//   inspect     — load datasets and print one encoded example
//
// Flags that describe the corpus are shared through
// CorpusArgs and converted into the application-layer
// DatasetConfig, so the application never sees clap types.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::config::DatasetConfig;
use crate::domain::split::SquadVersion;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a vocabulary from the train split and save it as JSON
    BuildVocab(BuildVocabArgs),

    /// Load datasets and print a summary plus one encoded example
    Inspect(InspectArgs),
}

/// Corpus selection flags shared by every command.
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// JSON config file; flags given on the command line win
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory containing the SQuAD JSON files
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Which release to load: squad1 or squad2
    #[arg(long = "dataset", value_parser = parse_version)]
    pub version: Option<SquadVersion>,

    /// HuggingFace tokenizer.json to use instead of basic English
    #[arg(long)]
    pub tokenizer_file: Option<PathBuf>,

    /// Drop tokens seen fewer times than this when building a vocab
    #[arg(long)]
    pub min_freq: Option<usize>,

    /// Cap on non-special vocabulary entries
    #[arg(long)]
    pub max_vocab_size: Option<usize>,
}

fn parse_version(s: &str) -> Result<SquadVersion, String> {
    s.parse().map_err(|e: crate::domain::error::DatasetError| e.to_string())
}

impl CorpusArgs {
    /// Start from the config file (or defaults) and apply flags on top.
    pub fn into_config(self) -> anyhow::Result<DatasetConfig> {
        let mut cfg = match &self.config {
            Some(path) => DatasetConfig::from_json_file(path)?,
            None       => DatasetConfig::default(),
        };
        if let Some(root) = self.root {
            cfg.root = root;
        }
        if let Some(version) = self.version {
            cfg.version = version;
        }
        if self.tokenizer_file.is_some() {
            cfg.tokenizer_file = self.tokenizer_file;
        }
        if let Some(min_freq) = self.min_freq {
            cfg.min_freq = min_freq;
        }
        if self.max_vocab_size.is_some() {
            cfg.max_vocab_size = self.max_vocab_size;
        }
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
pub struct BuildVocabArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Where to write the vocabulary JSON
    #[arg(long, default_value = "vocab.json")]
    pub out: PathBuf,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Split(s) to load; one name yields a single dataset
    #[arg(long = "split", num_args = 1..)]
    pub splits: Vec<String>,

    /// Pre-built vocabulary JSON (required when train is not loaded)
    #[arg(long)]
    pub vocab: Option<PathBuf>,

    /// Which example of the first split to print
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    /// Compute answer spans once at load time
    #[arg(long)]
    pub precompute_spans: bool,
}

impl InspectArgs {
    pub fn into_config(self) -> anyhow::Result<DatasetConfig> {
        let mut cfg = self.corpus.into_config()?;
        if !self.splits.is_empty() {
            cfg.splits = self.splits;
        }
        if self.vocab.is_some() {
            cfg.vocab_path = self.vocab;
        }
        cfg.precompute_spans |= self.precompute_spans;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_inspect_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "squad-qa", "inspect", "--root", "data", "--dataset", "squad2",
            "--split", "dev", "--vocab", "v.json", "--index", "3",
        ]).unwrap();

        let Commands::Inspect(args) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(args.index, 3);
        let cfg = args.into_config().unwrap();
        assert_eq!(cfg.root, PathBuf::from("data"));
        assert_eq!(cfg.version, SquadVersion::Squad2);
        assert_eq!(cfg.splits, vec!["dev"]);
        assert_eq!(cfg.vocab_path, Some(PathBuf::from("v.json")));
    }

    #[test]
    fn test_build_vocab_defaults() {
        let cli = Cli::try_parse_from(["squad-qa", "build-vocab"]).unwrap();
        let Commands::BuildVocab(args) = cli.command else {
            panic!("expected build-vocab");
        };
        assert_eq!(args.out, PathBuf::from("vocab.json"));
        assert_eq!(args.corpus.into_config().unwrap(), DatasetConfig::default());
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        assert!(Cli::try_parse_from(["squad-qa", "inspect", "--dataset", "squad3"]).is_err());
    }
}
