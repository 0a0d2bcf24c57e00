use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Fetch merged pull requests into the local cache
    Fetch {
        /// Page to start from (1-based)
        #[clap(short, long)]
        page: Option<u32>,
        /// Keep following the next page token until the listing is exhausted
        #[clap(long)]
        all_pages: bool,
    },
    /// List cached changes and their note status
    List,
    /// Show one cached change with its notes
    Show {
        id: String,
    },
    /// Stream developer and marketing notes for cached changes
    Generate {
        ids: Vec<String>,
        /// Generate for every cached change
        #[clap(short, long)]
        all: bool,
        /// With --all, skip changes that already have both notes
        #[clap(long)]
        missing_only: bool,
    },
    /// Delete every cached change
    Clear,
}
