#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Root of the catalog API, e.g. `https://api.example.com`.
    pub api_base_url: String,
    /// Session token sent as the `authorization` header.
    pub api_token: Option<String>,
    /// Shop scope sent as the `shop_id` header. Resolved through
    /// `/account/detail` when absent.
    pub shop_id: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Size ceiling for a single image, shared by the create and edit flows.
    pub max_image_bytes: u64,
    pub max_images: usize,
    pub create_min_images: usize,
    pub edit_min_images: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("api_base_url", &self.api_base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("shop_id", &self.shop_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("max_image_bytes", &self.max_image_bytes)
            .field("max_images", &self.max_images)
            .field("create_min_images", &self.create_min_images)
            .field("edit_min_images", &self.edit_min_images)
            .finish()
    }
}
