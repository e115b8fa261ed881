use clap::{Args, Parser, Subcommand, ValueEnum};

use relex::{AggregatorOptions, DedupPolicy, ExtractionOptions, UnmappedPolicy};

/// Relex: derives subject-predicate-object triples from entity co-occurrences
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Derives subject-predicate-object triples from NER-tagged sentences"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate triples for every non-trivial sentence
    Extract {
        /// Tagged input as JSON or JSON lines ("-" reads stdin)
        #[arg(default_value = "-")]
        input: String,

        /// Source locator for records that carry none
        #[arg(long, short = 'u')]
        source_url: Option<String>,

        /// Output format (text, json, csv)
        #[arg(long, short, default_value = "text")]
        format: String,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Also generate triples for trivial sentences
        #[arg(long)]
        keep_trivial: bool,
    },

    /// Show the entities aggregated for each sentence
    Summary {
        /// Tagged input as JSON or JSON lines ("-" reads stdin)
        #[arg(default_value = "-")]
        input: String,

        /// Output format (text, json); csv is not supported for summaries
        #[arg(long, short, default_value = "text")]
        format: String,

        /// Include sentences whose co-occurrences are trivial
        #[arg(long, short)]
        all: bool,

        /// How similar entity names are de-duplicated
        #[arg(long, value_enum, default_value_t = DedupArg::Contained)]
        dedup: DedupArg,
    },
}

#[derive(Args, Clone, Debug)]
pub struct PolicyArgs {
    /// How similar entity names are de-duplicated
    #[arg(long, value_enum, default_value_t = DedupArg::Contained)]
    pub dedup: DedupArg,

    /// Drop triples whose object type has no ontology mapping (PERCENT, TIME)
    #[arg(long)]
    pub suppress_unmapped: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DedupArg {
    /// Reject a name already contained in a recorded name
    Contained,

    /// Reject containment in either direction
    Symmetric,
}

impl std::fmt::Display for DedupArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DedupArg::Contained => write!(f, "contained"),
            DedupArg::Symmetric => write!(f, "symmetric"),
        }
    }
}

impl DedupArg {
    pub fn policy(&self) -> DedupPolicy {
        match self {
            DedupArg::Contained => DedupPolicy::ContainedInExisting,
            DedupArg::Symmetric => DedupPolicy::Symmetric,
        }
    }
}

impl PolicyArgs {
    pub fn aggregator_options(&self) -> AggregatorOptions {
        AggregatorOptions {
            dedup: self.dedup.policy(),
            unmapped: if self.suppress_unmapped {
                UnmappedPolicy::Suppress
            } else {
                UnmappedPolicy::Emit
            },
        }
    }

    pub fn extraction_options(&self, keep_trivial: bool) -> ExtractionOptions {
        ExtractionOptions {
            aggregator: self.aggregator_options(),
            skip_trivial: !keep_trivial,
        }
    }
}
