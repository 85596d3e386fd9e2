use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use homefeed::cli::{Cli, Commands};
use homefeed::config::Config;
use homefeed::domain::{Article, HomeFeedState, Section, SectionState, SessionContext};
use homefeed::errors::FeedResult;
use homefeed::gateway::GraphQlGateway;
use homefeed::services::{FollowService, HomeFeedService};
use homefeed::storage::sqlite::{SqliteFollowRepository, SqliteStorage};

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> FeedResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize storage
    let storage = SqliteStorage::new(&config.db_path)?;
    let follow_repo = SqliteFollowRepository::new(storage);

    match cli.command {
        Commands::Follow { slug } => cmd_follow(&slug, follow_repo, &config),
        Commands::Unfollow { slug } => cmd_unfollow(&slug, follow_repo, &config),
        Commands::Following => cmd_following(follow_repo, &config),
        Commands::Feed { json, retries } => cmd_feed(follow_repo, &config, json, retries),
    }
}

fn cmd_follow(slug: &str, follow_repo: SqliteFollowRepository, config: &Config) -> FeedResult<()> {
    let service = FollowService::new(follow_repo);
    let (slug, added) = service.follow(&config.user_id, slug)?;

    if added {
        println!("Now following: {}", slug);
    } else {
        println!("Already following: {}", slug);
    }

    Ok(())
}

fn cmd_unfollow(
    slug: &str,
    follow_repo: SqliteFollowRepository,
    config: &Config,
) -> FeedResult<()> {
    let service = FollowService::new(follow_repo);
    let (slug, removed) = service.unfollow(&config.user_id, slug)?;

    if removed {
        println!("Unfollowed: {}", slug);
    } else {
        println!("Not following: {}", slug);
    }

    Ok(())
}

fn cmd_following(follow_repo: SqliteFollowRepository, config: &Config) -> FeedResult<()> {
    let service = FollowService::new(follow_repo);
    let slugs = service.list(&config.user_id)?;

    if slugs.is_empty() {
        println!("Not following any publications.");
        return Ok(());
    }

    println!("Following {} publications:\n", slugs.len());
    for slug in slugs {
        println!("  {}", slug);
    }

    Ok(())
}

fn cmd_feed(
    follow_repo: SqliteFollowRepository,
    config: &Config,
    json: bool,
    retries: u32,
) -> FeedResult<()> {
    let endpoint = config.require_api_url()?;
    let gateway = GraphQlGateway::new(endpoint);
    let session = Arc::new(SessionContext::new(config.user_id.clone()));
    let service = Arc::new(HomeFeedService::new(
        gateway,
        follow_repo,
        Arc::clone(&session),
        config.limits,
    ));

    let runtime = tokio::runtime::Runtime::new()?;
    let load = runtime.block_on(async {
        let mut load = service.spawn_load().join().await?;
        for attempt in 1..=retries {
            if !load.state.has_errors() {
                break;
            }
            tracing::info!(attempt, "retrying failed sections");
            load = service.retry(&load).await;
        }
        FeedResult::Ok(load)
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&load.state)?);
        return Ok(());
    }

    print_feed(&load.state);

    if session.take_first_show() && load.state.is_following_empty {
        println!("Tip: follow publications with `homefeed follow <slug>` to fill your Following section.");
    }

    Ok(())
}

fn print_feed(state: &HomeFeedState) {
    for section in Section::ALL {
        println!("{}", section.heading());

        match state.section(section) {
            SectionState::Loading => println!("  Loading..."),
            SectionState::Error => println!("  Unable to load this section."),
            SectionState::Success(articles) => {
                for (i, article) in articles.iter().enumerate() {
                    println!("  {}. {}", i + 1, format_article(article));
                }
            }
        }

        if section == Section::Following {
            if let Some(notice) = state.following_notice() {
                println!("  {}", notice.message());
            }
        }

        println!();
    }

    if state.has_errors() {
        println!("Some sections failed to load. Run again with --retries to retry them.");
    }
}

fn format_article(article: &Article) -> String {
    let title = if article.title.is_empty() {
        "Untitled"
    } else {
        article.title.as_str()
    };

    let mut line = format!(
        "{} [{}] {} ({} shoutouts)",
        title,
        article.publication_slug,
        article.published_date.format("%Y-%m-%d"),
        article.shoutout_count
    );

    if let Some(url) = &article.article_url {
        line.push(' ');
        line.push_str(url);
    }

    line
}
