pub mod csrf_protection;
pub mod error;
pub mod resource;
pub mod routes;
pub mod session;
pub mod telemetry;
pub mod templating;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::FromRef;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::Key;
use olympics_cms_config::{CollectionIds, Config, ListingMode};
use olympics_cms_database::models::{Athlete, Event, NewsCard, TallyRow};
use olympics_cms_database::{get_store, AccountService, Collection, DocumentStore};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{error, info, info_span, warn, Level};

use crate::error::AppError;
use crate::resource::Resource;
use crate::routes::backend::resource as resource_routes;
use crate::routes::backend::{dashboard, login};
use crate::routes::{disciplines, full_news, health, index, indexcss, players, schedule};
use crate::templating::Templates;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub accounts: Arc<dyn AccountService>,
    pub templates: Arc<Templates>,
    pub collections: Arc<CollectionIds>,
    pub listing: ListingMode,
    pub key: Key,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        accounts: Arc<dyn AccountService>,
        collections: CollectionIds,
        listing: ListingMode,
        key: Key,
    ) -> Result<Self, AppError> {
        Ok(Self {
            store,
            accounts,
            templates: Arc::new(Templates::new()?),
            collections: Arc::new(collections),
            listing,
            key,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let store = get_store(&config.store)?;
        let key = match &config.cookie_secret {
            Some(secret) => {
                Key::try_from(secret.as_bytes()).map_err(|_err| AppError::CookieSecret)?
            }
            None => {
                warn!("no cookie secret configured, sessions won't survive a restart");
                Key::generate()
            }
        };
        let documents: Arc<dyn DocumentStore> = store.clone();
        Self::new(
            documents,
            store,
            config.store.collections.clone(),
            config.listing,
            key,
        )
    }

    #[must_use]
    pub fn collection<R: Resource>(&self) -> Collection<'_, R> {
        Collection::new(self.store.as_ref(), R::collection(&self.collections))
    }
}

fn backend_resource<R: Resource>(app: Router<AppState>) -> Router<AppState> {
    let path = format!("/backend/{}", R::KIND);
    app.route(
        &path,
        get(resource_routes::show::<R>).post(resource_routes::submit::<R>),
    )
    .route(
        &format!("{path}/delete"),
        post(resource_routes::delete::<R>),
    )
}

pub fn router(state: AppState) -> Router<()> {
    let app = Router::new()
        .route("/", get(index::index))
        .route("/schedule", get(schedule::schedule))
        .route("/players", get(players::players))
        .route("/disciplines", get(disciplines::disciplines))
        .route("/fullNews/:id", get(full_news::full_news))
        .route("/backend/login", get(login::login_page).post(login::login))
        .route("/backend/logout", post(login::logout))
        .route("/backend/dashboard", get(dashboard::dashboard))
        .route("/index.css", get(indexcss::indexcss))
        .route("/health", get(health::health));
    let app = backend_resource::<Athlete>(app);
    let app = backend_resource::<Event>(app);
    let app = backend_resource::<TallyRow>(app);
    let app = backend_resource::<NewsCard>(app);
    layers(app, state)
}

fn layers(app: Router<AppState>, state: AppState) -> Router<()> {
    // layers are in reverse order
    let app: Router<()> = app.with_state(state);
    let app = app.layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get("x-request-id")
                            .and_then(|value| value.to_str().ok())
                            .unwrap_or_default();
                        info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id,
                        )
                    })
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(CatchPanicLayer::new()),
    );
    app.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

pub async fn run_server(listen: SocketAddr, state: AppState) -> Result<(), AppError> {
    let app = router(state);
    let listener = TcpListener::bind(listen).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
