//! Channel CLI.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use channel::media::{file_to_data_url, resolve_media_arg};
use channel::render;
use channel_lib::commands::{self, PostDraft};
use channel_lib::config::{ChannelConfig, CONFIG_FILE};
use channel_lib::domain::{NavigationState, SortOrder};
use channel_lib::AppState;

mod cli;

use crate::cli::{BannerCommand, Cli, Command, OrderArg};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{:#}", error);
            eprintln!("error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    init_logging(&cli, &config)?;

    let state = AppState::open(config)
        .await
        .context("Failed to open channel data")?;
    dispatch(&state, cli.command, cli.json).await
}

/// Load `channel.json`, writing the defaults on first run so they can be edited
fn load_config(cli: &Cli) -> Result<ChannelConfig> {
    let config = ChannelConfig::load(&cli.data_dir)
        .with_context(|| format!("Failed to load {}", CONFIG_FILE))?;
    if !cli.data_dir.join(CONFIG_FILE).exists() {
        config
            .save()
            .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;
    }
    Ok(config)
}

fn init_logging(cli: &Cli, config: &ChannelConfig) -> Result<()> {
    let mut logger = rolling_logger::LoggerConfig::new(config.log_root(), "channel");
    logger.stderr = cli.log_level.is_some();
    if let Some(level) = cli.log_level {
        logger = logger.with_level(level.as_directive());
    }
    rolling_logger::init_with(logger).context("Failed to initialize logging")?;
    log::info!("channel started in {}", config.data_dir().display());
    Ok(())
}

async fn dispatch(state: &AppState, command: Command, json: bool) -> Result<()> {
    match command {
        Command::Feed { path } => {
            let nav = if path.is_empty() {
                commands::default_navigation(state).await
            } else {
                NavigationState::new(path)
            };
            let view = commands::feed(state, &nav).await;
            emit(json, &view, || render::render_feed(&view))?;
        }
        Command::Tabs => {
            let tabs = commands::list_tabs(state).await;
            emit(json, &tabs, || render::render_tree(&tabs))?;
        }
        Command::AddTab(args) => {
            let node = commands::add_tab(state, args.parent.as_deref(), &args.label).await?;
            emit(json, &node, || format!("Added tab {} ({})", node.label, node.id))?;
        }
        Command::Targets => {
            let targets = commands::post_targets(state).await;
            emit(json, &targets, || render::render_targets(&targets))?;
        }
        Command::Posts(args) => {
            let order = match args.order {
                OrderArg::Newest => SortOrder::NewestFirst,
                OrderArg::Oldest => SortOrder::OldestFirst,
            };
            let posts = commands::list_posts(state, order, args.tab.as_deref()).await?;
            emit(json, &posts, || render::render_post_listing(&posts))?;
        }
        Command::AddPost(args) => {
            let image_urls = args
                .images
                .iter()
                .map(|arg| resolve_media_arg(arg))
                .collect::<Result<Vec<_>>>()?;
            let video_url = args.video.as_deref().map(resolve_media_arg).transpose()?;
            let draft = PostDraft {
                tab_id: args.tab,
                content: args.content,
                image_urls,
                video_url,
            };
            let post = commands::add_post(state, draft).await?;
            emit(json, &post, || render::render_post(&post))?;
        }
        Command::Toggle { id } => {
            let post = commands::toggle_post(state, id).await?;
            let status = if post.is_enabled { "enabled" } else { "disabled" };
            emit(json, &post, || format!("Post {} {}", post.id, status))?;
        }
        Command::Banner(BannerCommand::Show) => {
            let banner = commands::get_banner(state).await;
            emit(json, &banner, || render::render_banner(&banner))?;
        }
        Command::Banner(BannerCommand::Set(args)) => {
            let mut banner = commands::get_banner(state).await;
            if let Some(title) = args.title {
                banner.title = title;
            }
            if let Some(followers) = args.followers {
                banner.follower_count_label = followers;
            }
            if let Some(image) = args.banner_image {
                banner.banner_image_ref = resolve_media_arg(&image)?;
            }
            if let Some(image) = args.profile_image {
                banner.profile_image_ref = resolve_media_arg(&image)?;
            }
            let banner = commands::update_banner(state, banner).await?;
            emit(json, &banner, || render::render_banner(&banner))?;
        }
        Command::Upload { file, path } => {
            let data_url = file_to_data_url(&file)?;
            let url = commands::upload_data_url(state, &data_url, &path).await?;
            emit(json, &url, || url.clone())?;
        }
        Command::Export { output } => {
            let exported = commands::export_data(state).await?;
            match output {
                Some(file) => {
                    std::fs::write(&file, exported)
                        .with_context(|| format!("Failed to write {}", file.display()))?;
                    println!("Exported to {}", file.display());
                }
                None => println!("{}", exported),
            }
        }
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let summary = commands::import_data(state, &text).await?;
            emit(json, &summary, || {
                format!("Imported {} tabs and {} posts", summary.tabs, summary.posts)
            })?;
        }
    }
    Ok(())
}

/// Print `value` as JSON, or the text rendering
fn emit<T, F>(json: bool, value: &T, text: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        let text = text();
        print!("{}", text);
        if !text.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
