#[macro_use]
extern crate rocket;

mod entrypoints;

use rocket::{Build, Rocket};
use rocket_prometheus::PrometheusMetrics;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pixel_phantoms_server::{config::Env, context::Context};
use shared::github::GithubClient;

fn build(context: Context) -> anyhow::Result<Rocket<Build>> {
    let prometheus = PrometheusMetrics::new();
    let cors = rocket_cors::CorsOptions::default()
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to build CORS options: {e}"))?;

    Ok(rocket::build()
        .manage(context)
        .attach(prometheus.clone())
        .attach(cors)
        .attach(entrypoints::stage())
        .mount("/metrics", prometheus)
        .mount(
            "/",
            SwaggerUi::new("/swagger-ui/<_..>")
                .url("/api-docs/openapi.json", entrypoints::ApiDoc::openapi()),
        ))
}

#[launch]
async fn rocket() -> _ {
    dotenv::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().pretty());
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let env = envy::from_env::<Env>().expect("Failed to load environment variables");
    let github = GithubClient::new(env.github_token.clone()).expect("Failed to create GitHub client");
    let context = Context::new(env)
        .expect("Failed to create context")
        .with_github(github);

    tracing::info!(
        "Serving {}/{} with events from {}",
        context.env.repo_owner,
        context.env.repo_name,
        context
            .events_endpoint()
            .map_or_else(|| "the fallback file".to_string(), |location| location.to_string())
    );

    build(context).expect("Failed to build rocket")
}
