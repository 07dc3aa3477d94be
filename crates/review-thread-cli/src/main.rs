use anyhow::{Context, Result};
use review_client::{FixtureClient, ThreadSync, UserSummary};
use review_config::AppConfig;
use review_thread::{
    NodeId, ThreadAction, ThreadEvent, ThreadResponse, ThreadSettings, ThreadViewState, UserId,
};
use tokio::io::{AsyncBufReadExt, BufReader};

mod args;
mod commands;
mod logger;
mod render;

use args::{Args, USAGE};
use commands::Command;

#[tokio::main]
async fn main() -> Result<()> {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let config = AppConfig::load();
    let log_file = logger::init(&config.log_level)?;
    log::info!("Starting review-thread, logging to {}", log_file.display());

    let result = run(args, config).await;
    if let Err(ref e) = result {
        log::error!("{:#}", e);
    }
    log::info!("Exiting review-thread");
    result
}

async fn run(args: Args, config: AppConfig) -> Result<()> {
    let viewer = config.viewer_id.map(UserId);
    let acting_as = UserSummary {
        id: config.viewer_id.unwrap_or_default(),
        username: config
            .viewer_name()
            .unwrap_or_else(|| "anonymous".to_string()),
        profile_image_url: None,
    };
    let fixtures_dir = args.fixtures.unwrap_or(config.fixtures_dir);
    let sync = ThreadSync::new(FixtureClient::new(fixtures_dir, acting_as), args.rating_id);

    let forest = match sync.load().await? {
        ThreadResponse::Loaded(forest) => forest,
        other => anyhow::bail!("Unexpected response to initial load: {:?}", other),
    };
    let mut state = ThreadViewState::new(forest, viewer)
        .with_context(|| format!("Rating {} has a malformed thread", args.rating_id))?
        .with_settings(ThreadSettings {
            optimistic_updates: config.optimistic_updates,
        });

    if viewer.is_none() {
        println!("Browsing read-only; set viewer_id in .review-thread.toml to interact.");
    }

    if let Some(comment) = args.comment {
        let events = state.handle_action(ThreadAction::DeepLink(NodeId::from(comment)));
        show(&sync, &mut state, events).await;
    } else {
        print!("{}", render::thread(&state));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let action = match commands::parse(&line) {
            Command::Action(action) => action,
            Command::UpvoteFocused => {
                ThreadAction::ToggleUpvote(state.cursor().focus_id().clone())
            }
            Command::Help => {
                println!("{}", commands::HELP);
                continue;
            }
            Command::Empty => continue,
            Command::Unknown(line) => {
                println!("Unknown command: {} (try 'help')", line);
                continue;
            }
        };

        let events = state.handle_action(action);
        if show(&sync, &mut state, events).await {
            break;
        }
    }

    Ok(())
}

/// Settle events against the API and print the result. Returns true when leaving.
async fn show(
    sync: &ThreadSync<FixtureClient>,
    state: &mut ThreadViewState,
    events: Vec<ThreadEvent>,
) -> bool {
    let rendered = sync.drive(state, events).await;

    let mut leaving = false;
    let mut redraw = false;
    for event in &rendered {
        if let Some(notice) = render::event(event) {
            println!("{}", notice);
        }
        match event {
            ThreadEvent::LeaveReview => leaving = true,
            ThreadEvent::FocusChanged { .. } | ThreadEvent::ThreadChanged { .. } => redraw = true,
            _ => {}
        }
    }

    if leaving {
        return true;
    }
    if redraw {
        print!("{}", render::thread(state));
    }

    // The text view has the target on screen as soon as it is printed
    if let Some(target) = state.pending_scroll().map(|scroll| scroll.target.clone()) {
        state.handle_action(ThreadAction::ScrollCompleted(target));
    }
    false
}
