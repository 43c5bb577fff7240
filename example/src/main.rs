use safe_option::{is_option, zip, SOption};
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // absent env var -> fallback, no null checks anywhere
    let port = SOption::from_option(std::env::var("EXAMPLE_PORT").ok())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| "25565".to_owned());
    info!("listening port would be {port}");

    let profile = SOption::some("admin")
        .map_async(|name| async move { format!("{name}@example") })
        .await;
    info!("loaded profile: {:?}", profile);

    let pair = zip(SOption::some(1), profile);
    info!(recognized = is_option(&pair), "zipped: {:?}", pair);

    match SOption::<u32>::none().try_expect("no session id in request") {
        Ok(id) => info!("session {id}"),
        Err(e) => error!(user_message = e.is_user_message(), "recovered: {e}"),
    }
}
