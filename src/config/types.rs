//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::application::DEFAULT_RECOMPUTE_ATTEMPTS;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 认证配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 统计重算配置
    #[serde(default)]
    pub stats: StatsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/ainovel.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// sqlx 连接串，文件不存在时自动创建
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 认证配置
///
/// 令牌由外部身份服务签发，这里只需要共享的 HS256 密钥
#[derive(Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// HS256 密钥，至少 32 字符
    #[serde(default)]
    pub jwt_secret: String,
}

impl AuthConfig {
    /// 脱敏后的密钥，用于日志输出
    pub fn masked_secret(&self) -> String {
        match self.jwt_secret.chars().count() {
            0 => "<unset>".to_string(),
            n => format!("{}*** ({} chars)", self.jwt_secret.chars().take(4).collect::<String>(), n),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.masked_secret())
            .finish()
    }
}

/// 统计重算配置
#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    /// 章节写入后重算项目统计的最大尝试次数（含首次）
    #[serde(default = "default_recompute_attempts")]
    pub recompute_attempts: u32,
}

fn default_recompute_attempts() -> u32 {
    DEFAULT_RECOMPUTE_ATTEMPTS
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            recompute_attempts: default_recompute_attempts(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
