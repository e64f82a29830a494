use crate::errors::AppResult;
use config::Config;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub api: Option<ApiConfig>,
    pub sys: Option<SysConfig>,
}

impl AppConfig {
    /// 加载配置：文件（可缺省） + `APP__` 前缀环境变量，例如 `APP__API__BASE_URL`
    pub fn load(file: &str) -> AppResult<Self> {
        let config = Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix("APP").prefix_separator("__").separator("__"))
            .build()?;
        let cfg = config.try_deserialize::<AppConfig>()?;
        Ok(cfg)
    }

    pub fn init(file: &str) -> AppResult<Arc<Self>> {
        let instance = Arc::new(Self::load(file)?);
        if INSTANCE.set(instance.clone()).is_err() {
            log::warn!("AppConfig already initialized, keeping the first instance");
        }
        Ok(Self::get())
    }

    pub fn get_api(&self) -> ApiConfig {
        self.api.clone().unwrap_or_default()
    }
    pub fn get_sys(&self) -> SysConfig {
        self.sys.clone().unwrap_or_default()
    }

    /// 获取单例，未初始化时返回默认配置
    pub fn get() -> Arc<Self> {
        INSTANCE.get_or_init(|| Arc::new(AppConfig::default())).clone()
    }
}
static INSTANCE: OnceCell<Arc<AppConfig>> = OnceCell::new();

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// 服务端根地址，不含 `/api`
    pub base_url: String,
    /// 单次请求超时（秒）
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout_secs: DEFAULT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SysConfig {
    //全局日志级别
    pub log_level: String,
}

impl Default for SysConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string() }
    }
}
