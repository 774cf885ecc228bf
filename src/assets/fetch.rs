use crate::foundation::error::{CardError, CardResult};

/// Raw response of a fetch; only status 200 counts as available.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub bytes: Vec<u8>,
}

impl FetchResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Network collaborator used for remote images and font downloads.
///
/// Implementations must be usable from several render threads at once.
pub trait AssetFetcher: Send + Sync {
    /// Fetch `url`. Transport failures are errors; HTTP failures are a non-200 status.
    fn fetch(&self, url: &str) -> CardResult<FetchResponse>;
}

/// Fetcher for builds without network access: every URL is unavailable.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineFetcher;

impl AssetFetcher for OfflineFetcher {
    fn fetch(&self, url: &str) -> CardResult<FetchResponse> {
        Err(CardError::resource(format!(
            "network access is disabled; cannot fetch {url}"
        )))
    }
}

/// Blocking HTTP fetcher backed by `reqwest`.
#[cfg(feature = "http")]
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub fn new() -> CardResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("social-cards/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CardError::Other(anyhow::anyhow!("build http client: {e}")))?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl AssetFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> CardResult<FetchResponse> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| CardError::resource(format!("fetch {url}: {e}")))?;
        let status = resp.status().as_u16();
        let bytes = resp
            .bytes()
            .map_err(|e| CardError::resource(format!("read body of {url}: {e}")))?
            .to_vec();
        Ok(FetchResponse { status, bytes })
    }
}
