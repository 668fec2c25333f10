//! LMS Client - Command Line Entry Point
//!
//! Pages through one collection of the configured LMS backend:
//!
//! ```text
//! lms-client <announcements|sections|comments> <parent-id> [pages]
//! ```

use std::sync::Arc;

use anyhow::{Context, bail};
use crossbeam_channel::{Receiver, unbounded};
use lms_client::connection::ClientConfig;
use lms_client::constants::{DEFAULT_PAGE_BUDGET, LOG_FILE_PREFIX};
use lms_client::domain::{Announcement, Comment, Resource, ResourceKind, Section};
use lms_client::eventing::{AppEvent, ChannelNotifier};
use lms_client::helpers::{get_or_create_data_dir, is_development};
use lms_client::services::{ApiClient, block_on};
use lms_client::state::ListView;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

struct Args {
    kind: ResourceKind,
    parent_id: String,
    pages: u32,
}

fn parse_args(args: &[String]) -> anyhow::Result<Args> {
    let (kind, parent_id) = match args {
        [kind, parent_id, ..] => (kind, parent_id),
        _ => bail!("usage: lms-client <announcements|sections|comments> <parent-id> [pages]"),
    };
    let kind: ResourceKind = kind.parse()?;
    if parent_id.trim().is_empty() {
        bail!("parent id must not be empty");
    }
    let pages = match args.get(2) {
        Some(pages) => pages
            .parse()
            .with_context(|| format!("invalid page count: {pages}"))?,
        None => DEFAULT_PAGE_BUDGET,
    };
    if pages == 0 {
        bail!("page count must be at least 1");
    }
    Ok(Args {
        kind,
        parent_id: parent_id.trim().to_string(),
        pages,
    })
}

fn init_tracing() -> anyhow::Result<WorkerGuard> {
    let level = if is_development() { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_dir = get_or_create_data_dir()?;
    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();
    Ok(guard)
}

/// Mount the list, then load more until exhausted or out of page budget
async fn list<R: Resource>(
    client: Arc<ApiClient>,
    config: &ClientConfig,
    args: &Args,
    events: &Receiver<AppEvent>,
    notifier: Arc<ChannelNotifier>,
) -> anyhow::Result<()> {
    let mut view: ListView<R, ApiClient> =
        ListView::new(client, notifier, config.page_size, config.cache_capacity);

    view.mount(&args.parent_id).await?;
    let mut loaded = 1;
    while view.has_more() && loaded < args.pages {
        view.load_more().await?;
        loaded += 1;
    }

    for event in events.try_iter() {
        match &event {
            AppEvent::Error { message, .. } => eprintln!("error: {message}"),
            other => tracing::debug!("{:?}", other),
        }
    }

    for item in view.items() {
        println!("{:>12}  {}", item.id(), item.summary());
    }
    println!(
        "-- {} {} from {} page(s){}",
        view.len(),
        args.kind,
        view.current_page(),
        if view.has_more() { ", more available" } else { "" }
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let _guard = init_tracing()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let config = ClientConfig::load().context("failed to load client config")?;
    let client = Arc::new(ApiClient::from_config(&config)?);
    tracing::info!(
        "Listing {} of {} from {}",
        args.kind,
        args.parent_id,
        client.base_url()
    );

    let (tx, rx) = unbounded();
    let notifier = Arc::new(ChannelNotifier::new(tx));

    block_on(async {
        match args.kind {
            ResourceKind::Announcements => {
                list::<Announcement>(client, &config, &args, &rx, notifier).await
            }
            ResourceKind::Sections => list::<Section>(client, &config, &args, &rx, notifier).await,
            ResourceKind::Comments => list::<Comment>(client, &config, &args, &rx, notifier).await,
        }
    })?
}
