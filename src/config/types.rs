use serde::Deserialize;

/// Heading that carries the organization name on the directory pages this crawler targets
pub const DEFAULT_NAME_SELECTOR: &str = "h1.text-center.color-dark.text-uppercase";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Stop after this many URLs have been visited
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Fixed pause between consecutive fetches (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 10_000,
            delay_ms: 200,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Contact extraction configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// CSS selector for the element holding the organization name
    #[serde(rename = "name-selector")]
    pub name_selector: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            name_selector: DEFAULT_NAME_SELECTOR.to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
            contact_email: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// `Name/Version`, followed by `(+ContactURL; ContactEmail)` when contact details are set.
    pub fn header_value(&self) -> String {
        let base = format!("{}/{}", self.crawler_name, self.crawler_version);
        match (&self.contact_url, &self.contact_email) {
            (Some(url), Some(email)) => format!("{} (+{}; {})", base, url, email),
            (Some(url), None) => format!("{} (+{})", base, url),
            (None, Some(email)) => format!("{} ({})", base, email),
            (None, None) => base,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV file written at flush time
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "collected_data.csv".to_string(),
        }
    }
}
