use api::routes::{public_routes, routes};
use axum::{Router, body::Body as AxumBody, extract::ConnectInfo, http::Request};
use migration::Migrator;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::sync::Once;
use util::state::AppState;

static INIT: Once = Once::new();

/// Fills in the configuration the `AppConfig` singleton needs before it is
/// first read. Runs once per test binary.
fn init_test_env() {
    INIT.call_once(|| {
        let qr_dir = std::env::temp_dir().join("rollcall-test-qr");
        unsafe {
            std::env::set_var("DATABASE_PATH", "unused-in-tests.db");
            std::env::set_var("JWT_SECRET", "test-secret-key");
            std::env::set_var("JWT_DURATION_MINUTES", "60");
            std::env::set_var("PUBLIC_BASE_URL", "http://127.0.0.1:3000");
            std::env::set_var("QR_STORAGE_ROOT", qr_dir.to_string_lossy().to_string());
        }
    });
}

/// Builds the full application router over a fresh in-memory database.
///
/// Returns the router (oneshot it per request) and the `AppState` so tests
/// can seed and inspect the database directly.
pub async fn make_test_app() -> (Router, AppState) {
    init_test_env();

    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let state = AppState::new(db);
    let router = Router::new()
        .nest("/api", routes(state.clone()))
        .merge(public_routes(state.clone()));

    (router, state)
}

/// Attach a `ConnectInfo<SocketAddr>` to a request after building, the way
/// `into_make_service_with_connect_info` would in production.
pub fn with_connect_info(mut req: Request<AxumBody>, ip: [u8; 4]) -> Request<AxumBody> {
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};
    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::from(ip)), 43210);
    req.extensions_mut().insert(ConnectInfo(addr));
    req
}
