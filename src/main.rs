mod cli;

use anyhow::Context;
use cli::output::Output;
use keygate::{api, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = cli::Cli::parse_args();
    let output = if args.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match &args.command {
        Some(cli::Commands::Init { path, force }) => cli::init::run(path, *force, &output),
        Some(cli::Commands::HashPassword { password }) => {
            let hash = keygate::auth::service::hash_password(password)?;
            println!("{hash}");
            Ok(())
        }
        Some(cli::Commands::Config { validate }) => show_config(&args, *validate, &output),
        None => serve(&args, &output).await,
    }
}

fn show_config(args: &cli::Cli, validate: bool, output: &Output) -> anyhow::Result<()> {
    let config = Config::load(&args.config).context("failed to load configuration")?;

    output.info(&format!(
        "server: {}:{}",
        config.server.host, config.server.port
    ));
    output.info(&format!(
        "auth: ttl={}s bearer_reject_forbidden={} revalidate_subject={} distinct_login_errors={}",
        config.auth.token_ttl_secs,
        config.auth.bearer_reject_forbidden,
        config.auth.revalidate_subject,
        config.auth.distinct_login_errors,
    ));
    output.info(&format!("seed users: {}", config.users.len()));

    if config.auth.jwt_secret.is_none() {
        output.warning("no jwt_secret configured; an ephemeral secret will be generated at startup");
    }

    if validate {
        AppState::from_config(config)?;
        output.success("configuration is valid");
    }

    Ok(())
}

async fn serve(args: &cli::Cli, output: &Output) -> anyhow::Result<()> {
    init_tracing(args.verbose);

    let config = Config::load(&args.config).context("failed to load configuration")?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    output.banner();

    let state = AppState::from_config(config)?;
    output.info(&format!("{} registered users", state.store.len()));
    output.info(&format!("token ttl: {}s", state.auth.token_ttl()));

    let app = api::routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    output.success(&format!("listening on http://{addr}"));
    tracing::info!(%addr, "keygate server started");

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "keygate=debug,tower_http=debug"
    } else {
        "keygate=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
