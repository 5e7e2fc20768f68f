// src/main.rs
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use migration::{Migrator, MigratorTrait};
use tracker_backend::api::handlers::{
    auth_handler::auth_router, project_handler::project_router, report_handler::report_router,
    task_handler::task_router, user_handler::user_router,
};
use tracker_backend::api::AppState;
use tracker_backend::config::Config;
use tracker_backend::db::create_db_pool;
use tracker_backend::middleware::auth::{jwt_auth_middleware, AuthMiddlewareConfig};
use tracker_backend::repository::attachment_repository::AttachmentRepository;
use tracker_backend::repository::comment_repository::CommentRepository;
use tracker_backend::repository::project_repository::ProjectRepository;
use tracker_backend::repository::role_repository::RoleRepository;
use tracker_backend::repository::task_repository::TaskRepository;
use tracker_backend::repository::user_repository::UserRepository;
use tracker_backend::service::attachment_service::AttachmentService;
use tracker_backend::service::auth_service::AuthService;
use tracker_backend::service::comment_service::CommentService;
use tracker_backend::service::project_service::ProjectService;
use tracker_backend::service::report_service::ReportService;
use tracker_backend::service::storage_service::LocalStorageService;
use tracker_backend::service::task_service::TaskService;
use tracker_backend::service::user_service::UserService;
use tracker_backend::utils::jwt::JwtManager;
use tracker_backend::utils::password::PasswordManager;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracker_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Tracker Backend server...");

    // 設定を読み込む
    let app_config = Config::from_env().expect("Failed to load configuration");

    // データベース接続を作成
    let db_pool = create_db_pool(&app_config)
        .await
        .expect("Failed to create database pool");

    tracing::info!("Database pool created successfully.");

    // マイグレーション実行（ロールと初期管理者の投入は冪等）
    Migrator::up(&db_pool, None)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied.");

    // リポジトリ
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let role_repo = Arc::new(RoleRepository::new(db_pool.clone()));
    let project_repo = Arc::new(ProjectRepository::new(db_pool.clone()));
    let task_repo = Arc::new(TaskRepository::new(db_pool.clone()));
    let comment_repo = Arc::new(CommentRepository::new(db_pool.clone()));
    let attachment_repo = Arc::new(AttachmentRepository::new(db_pool.clone()));

    // 認証まわり
    let password_manager = Arc::new(PasswordManager::new());
    let jwt_manager = Arc::new(JwtManager::from_env().expect("Failed to load JWT configuration"));

    // ストレージ
    let storage = Arc::new(LocalStorageService::new(&app_config.upload_dir));

    // サービス
    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        role_repo.clone(),
        password_manager.clone(),
        jwt_manager.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        user_repo.clone(),
        role_repo.clone(),
        password_manager.clone(),
    ));
    let project_service = Arc::new(ProjectService::new(
        db_pool.clone(),
        project_repo.clone(),
        user_repo.clone(),
        task_repo.clone(),
        role_repo.clone(),
    ));
    let task_service = Arc::new(TaskService::new(
        task_repo.clone(),
        project_repo.clone(),
        user_repo.clone(),
        role_repo.clone(),
        comment_repo.clone(),
        attachment_repo.clone(),
    ));
    let comment_service = Arc::new(CommentService::new(comment_repo.clone(), task_repo.clone()));
    let attachment_service = Arc::new(AttachmentService::new(
        attachment_repo.clone(),
        task_repo.clone(),
        storage,
    ));
    let report_service = Arc::new(ReportService::new(task_repo.clone(), project_repo.clone()));

    let app_state = AppState {
        auth_service,
        user_service,
        project_service,
        task_service,
        comment_service,
        attachment_service,
        report_service,
    };

    // 認証ミドルウェアの設定
    let auth_config = AuthMiddlewareConfig {
        jwt_manager,
        user_repository: user_repo,
    };

    // ルーターの設定：トークン発行と自己登録以外は認証必須
    let protected_routes = user_router()
        .merge(project_router())
        .merge(task_router())
        .merge(report_router())
        .layer(axum::middleware::from_fn_with_state(
            auth_config,
            jwt_auth_middleware,
        ));

    let app_router = auth_router()
        .merge(protected_routes)
        .with_state(app_state)
        .nest_service("/uploads", ServeDir::new(&app_config.upload_dir))
        .layer(axum::extract::DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // サーバーの起動
    tracing::info!(
        "Router configured. Server listening on {}",
        app_config.server_addr
    );

    let listener = TcpListener::bind(&app_config.server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
