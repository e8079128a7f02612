use serde::Deserialize;

/// Main configuration structure for Reel-Harvest
///
/// Every section is optional in the TOML file; missing sections fall back
/// to values that crawl the public site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub fetcher: FetcherConfig,
    pub filmography: FilmographyConfig,
    pub output: OutputConfig,
    pub batch: BatchConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Scheme and host every page URL is built on
    pub base_url: String,

    /// Hosts the fetcher is allowed to visit
    pub allowed_domains: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.imdb.com".to_string(),
            allowed_domains: vec!["www.imdb.com".to_string()],
        }
    }
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetcherConfig {
    /// Accept-Language value sent with every request
    pub accept_language: String,

    /// User agent string
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    pub connect_timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            accept_language: "en-US,en;q=0.9,ro;q=0.8".to_string(),
            user_agent: concat!("reel-harvest/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Query parameters for filmography searches
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FilmographyConfig {
    /// Field the site is asked to sort by
    pub sort: String,

    /// "asc" or "desc"
    pub sort_order: String,

    /// Record-type filter (e.g. "movie")
    pub title_type: String,
}

impl Default for FilmographyConfig {
    fn default() -> Self {
        Self {
            sort: "year".to_string(),
            sort_order: "asc".to_string(),
            title_type: "movie".to_string(),
        }
    }
}

/// When the accumulated records are written out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersistPolicy {
    /// Rewrite the artifact after every appended record
    #[default]
    PerRecord,

    /// Rewrite the artifact once after each page's records
    PerPage,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Root directory for JSON artifacts
    pub directory: String,

    /// Write policy
    pub persist: PersistPolicy,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "./scraped".to_string(),
            persist: PersistPolicy::PerRecord,
        }
    }
}

/// What a batch does when one target's session fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Halt the whole batch on the first failure
    #[default]
    Abort,

    /// Log the failure and move on to the next target
    Continue,
}

/// Batch mode configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BatchConfig {
    pub on_failure: FailurePolicy,
}
