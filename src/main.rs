//! AINovel - 多租户小说创作后端
//!
//! 启动顺序：配置 → 日志 → 数据库 → 仓储与服务 → HTTP 服务器

use std::sync::Arc;

use ainovel::application::ports::{ChapterRepositoryPort, ProjectRepositoryPort};
use ainovel::application::ProjectStatsAggregator;
use ainovel::config::{load_config, print_config};
use ainovel::infrastructure::http::{AppState, HttpServer, ServerConfig};
use ainovel::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteChapterRepository,
    SqliteProjectRepository,
};
use ainovel::infrastructure::{InMemoryProjectLocks, JwtVerifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},ainovel={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("AINovel - 小说创作后端 v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let chapter_repo: Arc<dyn ChapterRepositoryPort> =
        Arc::new(SqliteChapterRepository::new(pool.clone()));
    let project_repo: Arc<dyn ProjectRepositoryPort> =
        Arc::new(SqliteProjectRepository::new(pool.clone()));

    // 按项目串行化写操作
    let locks = Arc::new(InMemoryProjectLocks::new());

    let aggregator = Arc::new(
        ProjectStatsAggregator::new(chapter_repo.clone(), project_repo.clone())
            .with_max_attempts(config.stats.recompute_attempts),
    );

    let jwt_verifier = Arc::new(JwtVerifier::new(&config.auth.jwt_secret)?);

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(chapter_repo, project_repo, locks, aggregator, jwt_verifier);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}
