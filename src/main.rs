use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use groovi_users::config::Config;
use groovi_users::models::{
    CreateUser, CreatedUserResponse, LookupUser, RandomVideosRequest, UpdateUser,
    UserExistsResponse, UserResponse, UserSummary, VideoPick,
};
use groovi_users::state::AppState;
use groovi_users::{build_router, handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::user::create_user,
        handlers::user::get_user,
        handlers::user::search_user,
        handlers::user::update_user,
        handlers::user::list_users,
        handlers::video::random_videos,
    ),
    components(schemas(
        CreateUser,
        CreatedUserResponse,
        LookupUser,
        UserResponse,
        UserExistsResponse,
        UpdateUser,
        UserSummary,
        RandomVideosRequest,
        VideoPick,
    )),
    tags(
        (name = "Users", description = "User profile endpoints"),
        (name = "Videos", description = "Video discovery endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    init_tracing();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let addr = config.server_addr();

    // Initialize application state (opens the connection pool)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await.unwrap();
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "groovi_users=debug,tower_http=info".into());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
