use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::analysis::ribozyme_filter::RibozymeFilterOptions;
use crate::config::{ClassificationConfig, DEFAULT_MAX_EVALUE};
use crate::models::CutoffKind;

#[derive(Parser, Debug)]
#[command(version, about = "Search for viroid-like circular RNAs", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubArgs,

    #[arg(
        short = 't',
        long = "threads",
        help = "Number of threads",
        value_name = "THREADS",
        default_value_t = num_cpus::get(),
        global = true
    )]
    pub threads: usize,

    #[arg(short = 'v', long = "verbose", help = "Log debug messages", global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum SubArgs {
    /// Using ribozyme search results, find viroid-like sequences.
    #[command(name = "ribozyme-filter")]
    RibozymeFilter {
        #[command(flatten)]
        args: RibozymeFilterArgs,
    },
}

#[derive(Debug, Parser)]
pub struct RibozymeFilterArgs {
    #[arg(value_name = "INFERNAL_TBLOUT", help = "Path to Infernal tabular output")]
    pub infernal_tblout: PathBuf,

    #[arg(
        long = "output-tsv",
        value_name = "PATH",
        help = "Path to output TSV file with Infernal results for viroid-like sequences"
    )]
    pub output_tsv: Option<PathBuf>,

    #[arg(
        long = "use-cm-cutoff",
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        help = "Use CM cutoffs to determine if a ribozyme is present"
    )]
    pub use_cm_cutoff: bool,

    #[arg(
        long = "cm-file",
        value_name = "PATH",
        env = "VDSEARCH_REFERENCE_CMS",
        help = "Path to the ribozyme covariance models"
    )]
    pub cm_file: Option<PathBuf>,

    #[arg(
        long = "cm-cutoff-type",
        value_name = "KIND",
        value_enum,
        default_value_t = CutoffKind::GA,
        help = "Which CM cutoff to compare scores against"
    )]
    pub cm_cutoff_type: CutoffKind,

    #[arg(
        long = "use-evalue-cutoff",
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        help = "Use evalue cutoff to determine if a ribozyme is present"
    )]
    pub use_evalue_cutoff: bool,

    #[arg(
        long = "max-evalue",
        value_name = "FLOAT",
        default_value_t = DEFAULT_MAX_EVALUE,
        help = "Maximum evalue to use when determining if a ribozyme is present"
    )]
    pub max_evalue: f64,

    #[arg(long = "summary-tsv", value_name = "PATH", help = "Write per-ribozyme polarity counts")]
    pub summary_tsv: Option<PathBuf>,

    #[arg(long = "ids-out", value_name = "PATH", help = "Write viroid-like sequence ids, one per line")]
    pub ids_out: Option<PathBuf>,

    #[arg(long = "report-json", value_name = "PATH", help = "Write run counts and settings as JSON")]
    pub report_json: Option<PathBuf>,
}

impl From<RibozymeFilterArgs> for RibozymeFilterOptions {
    fn from(args: RibozymeFilterArgs) -> Self {
        RibozymeFilterOptions {
            infernal_tblout: args.infernal_tblout,
            output_tsv: args.output_tsv,
            cm_file: args.cm_file,
            config: ClassificationConfig {
                use_cutoff_filter: args.use_cm_cutoff,
                cutoff_kind: args.cm_cutoff_type,
                use_evalue_filter: args.use_evalue_cutoff,
                max_evalue: args.max_evalue,
            },
            summary_tsv: args.summary_tsv,
            ids_out: args.ids_out,
            report_json: args.report_json,
        }
    }
}
