//! CLI argument definitions for the channel tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "channel",
    version,
    about = "Channel feed viewer and admin tool",
    long_about = "Browse a channel's posts through its tab hierarchy and manage\n\
                  tabs, posts and branding. Data lives in a local directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding channel.json, the database, blobs and logs.
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        env = "CHANNEL_DATA_DIR",
        default_value = "channel-data",
        global = true
    )]
    pub data_dir: PathBuf,

    /// Log level; also echoes logs to stderr when given.
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Print results as JSON instead of text.
    #[arg(long = "json", global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the feed for a tab path (defaults to the first tab).
    Feed {
        /// Tab ids from the root down, e.g. `rajya yojanaye pmay`.
        #[arg(value_name = "TAB")]
        path: Vec<String>,
    },

    /// Show the tab hierarchy.
    Tabs,

    /// Add a tab.
    AddTab(AddTabArgs),

    /// List leaf tabs that can receive posts.
    Targets,

    /// List posts, including disabled ones.
    Posts(PostsArgs),

    /// Publish a post.
    AddPost(AddPostArgs),

    /// Enable or disable a post.
    Toggle {
        #[arg(value_name = "POST_ID")]
        id: u64,
    },

    /// Show or change the channel banner.
    #[command(subcommand)]
    Banner(BannerCommand),

    /// Upload a file to the blob store and print its URL.
    Upload {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Destination path inside the blob store.
        #[arg(long = "path", value_name = "PATH")]
        path: String,
    },

    /// Write the channel data as JSON.
    Export {
        /// Output file (default: stdout).
        #[arg(long = "output", short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Replace the channel data with an exported JSON file.
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Parser)]
pub struct AddTabArgs {
    /// Display label; the id is derived from it.
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Parent tab id (default: new root tab).
    #[arg(long = "parent", value_name = "TAB")]
    pub parent: Option<String>,
}

#[derive(Parser)]
pub struct PostsArgs {
    /// Only posts under this tab.
    #[arg(long = "tab", value_name = "TAB")]
    pub tab: Option<String>,

    #[arg(long = "order", value_enum, default_value = "newest")]
    pub order: OrderArg,
}

#[derive(Parser)]
pub struct AddPostArgs {
    /// Leaf tab to post in.
    #[arg(long = "tab", value_name = "TAB")]
    pub tab: String,

    #[arg(value_name = "CONTENT")]
    pub content: String,

    /// Image URL or local file; repeatable.
    #[arg(long = "image", value_name = "URL|FILE")]
    pub images: Vec<String>,

    /// Video URL or local file.
    #[arg(long = "video", value_name = "URL|FILE")]
    pub video: Option<String>,
}

#[derive(Subcommand)]
pub enum BannerCommand {
    /// Print the current banner.
    Show,

    /// Change banner fields; omitted fields keep their value.
    Set(BannerSetArgs),
}

#[derive(Parser)]
pub struct BannerSetArgs {
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Follower label, e.g. "1.2M followers".
    #[arg(long = "followers")]
    pub followers: Option<String>,

    /// Banner image URL or local file.
    #[arg(long = "banner-image", value_name = "URL|FILE")]
    pub banner_image: Option<String>,

    /// Profile image URL or local file.
    #[arg(long = "profile-image", value_name = "URL|FILE")]
    pub profile_image: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OrderArg {
    Newest,
    Oldest,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevelArg::Error => "error",
            LogLevelArg::Warn => "warn",
            LogLevelArg::Info => "info",
            LogLevelArg::Debug => "debug",
            LogLevelArg::Trace => "trace",
        }
    }
}
