use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tenderwatch", version, about = "Search, filter and summarise procurement records")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a seeded mock collection as a JSON array
    Generate {
        kind: Kind,
        #[arg(long, default_value_t = 50)]
        count: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, short, help = "Write to a file instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Run one listing query over a JSON collection
    Query {
        kind: Kind,
        #[command(flatten)]
        args: QueryArgs,
    },
    /// Procuring entity roll-ups, largest spend first
    Entities {
        #[arg(long, help = "JSON array of tenders")]
        file: PathBuf,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "all")]
        county: String,
        #[command(flatten)]
        pager: PagerArgs,
    },
    /// Risk distribution and per-county totals for a tender collection
    Stats {
        #[arg(long, help = "JSON array of tenders")]
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    #[arg(long, help = "JSON array of records")]
    pub file: PathBuf,
    #[arg(long, help = "Case-insensitive text to look for")]
    pub search: Option<String>,
    #[arg(
        long = "filter",
        value_name = "FIELD=VALUE",
        help = "VALUE is `all`, a single value, `a|b`, or a range `lo..hi`"
    )]
    pub filters: Vec<String>,
    #[arg(long, value_name = "FIELD[:asc|desc],...")]
    pub sort: Option<String>,
    #[command(flatten)]
    pub pager: PagerArgs,
}

#[derive(Args, Debug)]
pub struct PagerArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub page: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    pub page_size: Option<i64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Tenders,
    Suppliers,
    Investigations,
    Reports,
}
