//! Plain-text rendering of the viewer and admin screens.

use std::fmt::Write;

use channel_lib::commands::{FeedView, PostTarget};
use channel_lib::domain::{BannerConfig, Post, TabButton, TabTree};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::tree::flatten_tree;

const EMPTY_FEED: &str = "No posts in this section yet.";

pub fn render_banner(banner: &BannerConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", banner.title);
    let _ = writeln!(out, "{}", banner.follower_count_label);
    let _ = writeln!(out, "banner:  {}", banner.banner_image_ref);
    let _ = writeln!(out, "profile: {}", banner.profile_image_ref);
    out
}

/// The viewer screen
pub fn render_feed(view: &FeedView) -> String {
    let mut out = render_banner(&view.banner);
    out.push('\n');
    let _ = writeln!(out, "{}", tab_bar(&view.main_tabs));
    for bar in &view.bars {
        let _ = writeln!(out, "{}{}", "  ".repeat(bar.depth + 1), tab_bar(&bar.tabs));
    }
    if !view.breadcrumb.is_empty() {
        let _ = writeln!(out, "\n{}", view.breadcrumb.join(" > "));
    }
    out.push('\n');

    if view.posts.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_FEED);
    }
    for post in &view.posts {
        out.push_str(&render_post(post));
        out.push('\n');
    }
    out
}

fn tab_bar(tabs: &[TabButton]) -> String {
    tabs.iter()
        .map(|tab| {
            if tab.active {
                format!("[{}]", tab.label)
            } else {
                format!(" {} ", tab.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_post(post: &Post) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} · {}",
        post.author,
        post.handle,
        post.created_at.format("%Y-%m-%d %H:%M")
    );
    let _ = writeln!(out, "{}", post.content);
    for url in &post.image_urls {
        let _ = writeln!(out, "  image: {}", url);
    }
    if let Some(video) = &post.video_url {
        let _ = writeln!(out, "  video: {}", video);
    }
    let stats = &post.stats;
    let _ = writeln!(
        out,
        "  {} comments  {} retweets  {} likes  {} views",
        stats.comments, stats.retweets, stats.likes, stats.views
    );
    out
}

/// Indented tab hierarchy with ids
pub fn render_tree(tree: &TabTree) -> String {
    let mut out = String::new();
    for (node, depth) in flatten_tree(tree) {
        let _ = writeln!(out, "{}{} ({})", "  ".repeat(depth), node.label, node.id);
    }
    out
}

pub fn render_targets(targets: &[PostTarget]) -> String {
    let mut table = styled_table();
    table.set_header(vec![header_cell("Tab"), header_cell("Path")]);
    for target in targets {
        table.add_row(vec![Cell::new(&target.id), Cell::new(&target.path_label)]);
    }
    table.to_string()
}

/// Admin post listing, disabled posts included
pub fn render_post_listing(posts: &[Post]) -> String {
    let mut table = styled_table();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Tab"),
        header_cell("Status"),
        header_cell("Created"),
        header_cell("Content"),
    ]);
    for post in posts {
        let status = if post.is_enabled {
            Cell::new("enabled").fg(Color::Green)
        } else {
            Cell::new("disabled").fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(post.id),
            Cell::new(&post.tab_id),
            status,
            Cell::new(post.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(excerpt(&post.content, 60)),
        ]);
    }
    table.to_string()
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

/// First `max` characters of the first line
fn excerpt(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > max {
        let cut: String = line.chars().take(max).collect();
        format!("{}…", cut)
    } else {
        line.to_string()
    }
}
