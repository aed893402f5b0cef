//! Cookie-keeping HTTP client wrapping reqwest.
//!
//! Not a browser, just HTTP requests dressed up with the headers a desktop
//! Chrome would send, because the site turns away traffic that lacks them.
//! One request per call, no retries.

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{TremorError, TremorResult};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/66.0.3359.181 Safari/537.36";

const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8";

/// Response from a GET or form POST.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// HTTP client holding the session cookies.
///
/// Deliberately not `Clone`: two handles would share one cookie jar.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a client with the browser header set and an empty cookie jar.
    pub fn new(config: &ClientConfig) -> TremorResult<Self> {
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(browser_headers(config)?);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    /// Resolve a site-relative path (e.g. `index.php?action=tos`).
    pub fn url_for(&self, path: &str) -> TremorResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// GET a site-relative path.
    pub async fn get(&self, path: &str) -> TremorResult<HttpResponse> {
        let url = self.url_for(path)?;
        tracing::debug!("GET {url}");

        let r = self.client.get(url.clone()).send().await?;
        Self::read(url, r).await
    }

    /// POST url-encoded form data to a site-relative path.
    pub async fn post_form(
        &self,
        path: &str,
        form_fields: &[(&str, &str)],
    ) -> TremorResult<HttpResponse> {
        let url = self.url_for(path)?;
        tracing::debug!("POST {url} ({} fields)", form_fields.len());

        let r = self.client.post(url.clone()).form(form_fields).send().await?;
        Self::read(url, r).await
    }

    async fn read(url: Url, r: reqwest::Response) -> TremorResult<HttpResponse> {
        let status = r.status().as_u16();
        let final_url = r.url().to_string();
        let body = r.text().await?;

        tracing::debug!("{status} from {final_url} ({} bytes)", body.len());

        Ok(HttpResponse {
            url: url.to_string(),
            final_url,
            status,
            body,
        })
    }
}

/// The fixed header set sent with every request.
fn browser_headers(config: &ClientConfig) -> TremorResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    let pairs: [(HeaderName, String); 10] = [
        (header::USER_AGENT, USER_AGENT.to_string()),
        (header::REFERER, config.referer()),
        (
            header::CONTENT_TYPE,
            "application/x-www-form-urlencoded".to_string(),
        ),
        (header::ACCEPT_LANGUAGE, "en-US,en;q=0.9".to_string()),
        (header::ACCEPT, ACCEPT.to_string()),
        (header::HOST, config.host_header()),
        (header::ORIGIN, config.origin()),
        (header::CONNECTION, "keep-alive".to_string()),
        (header::UPGRADE_INSECURE_REQUESTS, "1".to_string()),
        (header::ACCEPT_ENCODING, "gzip, deflate".to_string()),
    ];

    for (name, value) in pairs {
        let value = HeaderValue::from_str(&value)
            .map_err(|_| TremorError::InvalidHeader(format!("{name}: {value}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new(&ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_browser_headers_for_live_site() {
        let headers = browser_headers(&ClientConfig::default()).unwrap();
        assert_eq!(headers[header::HOST], "www.tremorgames.com");
        assert_eq!(headers[header::ORIGIN], "http://www.tremorgames.com");
        assert_eq!(headers[header::REFERER], "http://www.tremorgames.com/");
        assert_eq!(
            headers[header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        assert!(headers[header::USER_AGENT]
            .to_str()
            .unwrap()
            .contains("Chrome/66.0.3359.181"));
    }

    #[test]
    fn test_url_for_resolves_against_base() {
        let client = HttpClient::new(&ClientConfig::default()).unwrap();
        assert_eq!(
            client.url_for("?action=viewreferrals").unwrap().as_str(),
            "http://www.tremorgames.com/?action=viewreferrals"
        );
        assert_eq!(
            client.url_for("message/42/message.html").unwrap().as_str(),
            "http://www.tremorgames.com/message/42/message.html"
        );
    }
}
