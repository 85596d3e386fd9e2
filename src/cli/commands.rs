use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "homefeed")]
#[command(about = "Student publication home feed: trending, following and other articles")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Follow a publication by slug (e.g. cornell-daily-sun)
    Follow {
        /// Publication slug to follow
        slug: String,
    },

    /// Stop following a publication
    Unfollow {
        /// Publication slug to unfollow
        slug: String,
    },

    /// List followed publications
    Following,

    /// Load and print the home feed
    Feed {
        /// Print the feed state as JSON instead of text
        #[arg(long)]
        json: bool,

        /// Retry failed sections up to this many times
        #[arg(long, default_value_t = 0)]
        retries: u32,
    },
}
