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
    pub start_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub crawl_delay_ms: u64,
    pub crawl_randomize_delay: bool,
    pub crawl_max_pages: usize,
    pub search_url: String,
    pub search_timeout_secs: u64,
    pub search_delay_ms: u64,
    pub search_max_snippets: usize,
    pub batch_size: usize,
    pub batch_pause_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("start_url", &self.start_url)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("crawl_delay_ms", &self.crawl_delay_ms)
            .field("crawl_randomize_delay", &self.crawl_randomize_delay)
            .field("crawl_max_pages", &self.crawl_max_pages)
            .field("search_url", &self.search_url)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("search_delay_ms", &self.search_delay_ms)
            .field("search_max_snippets", &self.search_max_snippets)
            .field("batch_size", &self.batch_size)
            .field("batch_pause_ms", &self.batch_pause_ms)
            .finish()
    }
}
