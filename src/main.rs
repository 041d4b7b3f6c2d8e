use community_events::{service, AppState, Config};
use dotenv::dotenv;
use log::{error, info};

#[tokio::main]
async fn main() {
    // before the logger, `.env` may set RUST_LOG
    dotenv().ok();
    service::log::init_logger();
    if let Err(err) = run().await {
        error!("{}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), community_events::AppError> {
    let config = Config::from_env()?;
    info!("rsvp scope: {:?}", config.rsvp_scope);
    let state = AppState::from_config(&config).await?;

    let ((user, rsvps), created) = futures::try_join!(
        state.restore(),
        state.catalog.list_user_created_events()
    )?;

    match &user {
        Some(user) => info!("signed in as {} ({})", user.email, user.id),
        None => info!("nobody is signed in"),
    }
    info!("rsvps: {:?}", rsvps);
    for event in state.catalog.list_seed_events() {
        info!(
            "[{}] {} - {} at {} ({} going)",
            event.id,
            event.date.format("%b %e, %Y"),
            event.name,
            event.location,
            event.attendees
        );
    }
    info!("{} user-created event(s)", created.len());
    for event in &created {
        info!("[{}] {} by {}", event.id, event.name, event.created_by);
    }
    Ok(())
}
