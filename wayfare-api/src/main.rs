use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wayfare_api::{
    app,
    state::{AppState, AuthConfig},
};
use wayfare_core::payment::MockPaymentAdapter;
use wayfare_store::{
    DbClient, PostgresFlightRepository, PostgresPoiRepository, PostgresPriceRepository,
    PostgresReservationRepository, PostgresUserRepository, PostgresVehicleRepository,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wayfare_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = wayfare_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Wayfare API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let pool = db.pool.clone();

    let app_state = AppState {
        prices: Arc::new(PostgresPriceRepository::new(pool.clone())),
        flights: Arc::new(PostgresFlightRepository::new(pool.clone())),
        pois: Arc::new(PostgresPoiRepository::new(pool.clone())),
        vehicles: Arc::new(PostgresVehicleRepository::new(pool.clone())),
        reservations: Arc::new(PostgresReservationRepository::new(pool.clone())),
        users: Arc::new(PostgresUserRepository::new(pool)),
        store_health: Arc::new(db),
        payments: Arc::new(MockPaymentAdapter),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        business_rules: config.business_rules.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
