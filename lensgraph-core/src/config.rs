use crate::error::{ApiError, Result};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://api-v2.lens.dev/";
pub const DEFAULT_ORDER_BY: &str = "PROFILE_CLASSIFIER";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Number of followers requested per listing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
}

impl PageSize {
    /// Value of the `LimitType` enum expected by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSize::Ten => "Ten",
            PageSize::TwentyFive => "TwentyFive",
            PageSize::Fifty => "Fifty",
        }
    }

    pub fn count(&self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ten" | "10" => Some(PageSize::Ten),
            "twenty-five" | "twentyfive" | "25" => Some(PageSize::TwentyFive),
            "fifty" | "50" => Some(PageSize::Fifty),
            _ => None,
        }
    }
}

/// Settings for a [`LensClient`](crate::lens::LensClient).
#[derive(Debug, Clone)]
pub struct LensConfig {
    pub endpoint: Url,
    pub page_size: PageSize,
    pub order_by: String,
    pub timeout_secs: u64,
    pub cache: bool,
    pub user_agent: String,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            page_size: PageSize::default(),
            order_by: DEFAULT_ORDER_BY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache: false,
            user_agent: format!(
                "Lensgraph/{} (https://github.com/trapdoorsec/lensgraph)",
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

impl LensConfig {
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self> {
        let url = Url::parse(endpoint)
            .map_err(|e| ApiError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ApiError::InvalidEndpoint(format!(
                "{}: unsupported scheme '{}'",
                endpoint,
                url.scheme()
            )));
        }
        self.endpoint = url;
        Ok(self)
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }
}
