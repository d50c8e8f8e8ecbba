// ABOUTME: The Client struct that fetches pages over HTTP and extracts their main text.
// ABOUTME: Provides async fetch_article() for URLs and infallible extract() for raw markup.

use std::net::ToSocketAddrs;

use crate::error::ExtractError;
use crate::extractors::{Article, Extractor};
use crate::options::{ClientBuilder, Options};
use crate::resource::{fetch, is_private_ip, FetchOptions};

/// Fetches web pages and extracts their readable text.
#[derive(Debug)]
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
    extractor: Extractor,
}

/// Redirect policy that refuses hops into private networks.
fn guarded_redirects() -> reqwest::redirect::Policy {
    reqwest::redirect::Policy::custom(|attempt| {
        if attempt.previous().len() >= 10 {
            return attempt.error("too many redirects");
        }
        let next = attempt.url().clone();
        let Some(host) = next.host_str() else {
            return attempt.follow();
        };
        let host = host.trim_start_matches('[').trim_end_matches(']');

        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            if is_private_ip(&ip) {
                return attempt.error("redirect to private IP blocked");
            }
            return attempt.follow();
        }

        // synchronous DNS resolution to avoid async in redirect policy
        let port = next.port_or_known_default().unwrap_or(80);
        match (host, port).to_socket_addrs() {
            Ok(mut addrs) => {
                if addrs.any(|sa| is_private_ip(&sa.ip())) {
                    attempt.error("redirect to private IP blocked")
                } else {
                    attempt.follow()
                }
            }
            Err(_) => attempt.error("DNS lookup failed during redirect"),
        }
    })
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, ExtractError> {
        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => {
                let redirect = if opts.allow_private_networks {
                    reqwest::redirect::Policy::limited(10)
                } else {
                    guarded_redirects()
                };
                reqwest::Client::builder()
                    .redirect(redirect)
                    .user_agent(&opts.user_agent)
                    .timeout(opts.timeout)
                    .cookie_store(true)
                    .gzip(true)
                    .brotli(true)
                    .deflate(true)
                    .build()
                    .map_err(|e| {
                        ExtractError::fetch(
                            "",
                            "Client",
                            Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                        )
                    })?
            }
        };

        let extractor = Extractor::new(opts.min_article_words);
        Ok(Self {
            opts,
            http_client,
            extractor,
        })
    }

    /// The options this client was built with.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Extract the main text of raw markup. Never fails.
    pub fn extract(&self, markup: &str) -> Article {
        self.extractor.extract(markup)
    }

    /// Fetch `url` and extract its main text.
    ///
    /// Transport problems (bad URL, connection failure, timeout, non-2xx status)
    /// and non-textual responses are returned as errors; use
    /// [`ExtractError::tagged`] for the user-facing message.
    pub async fn fetch_article(&self, url: &str) -> Result<Article, ExtractError> {
        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
            allow_private_networks: self.opts.allow_private_networks,
            timeout: Some(self.opts.timeout),
        };

        let fetched = fetch(&self.http_client, url, &fetch_opts).await?;
        if fetched.is_binary() {
            return Err(ExtractError::extract(
                url,
                "Extract",
                Some(anyhow::anyhow!(
                    "unsupported content type {}",
                    fetched.content_type.as_deref().unwrap_or("")
                )),
            ));
        }

        let article = self.extract(&fetched.text());
        tracing::debug!(
            url,
            final_url = %fetched.final_url,
            words = article.word_count,
            "article extracted"
        );
        Ok(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::StrategyKind;
    use crate::options::DEFAULT_USER_AGENT;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn local_client() -> Client {
        Client::builder()
            .allow_private_networks(true)
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap()
    }

    fn long_article() -> String {
        let para = "Researchers measured the river level every morning for a year. ".repeat(12);
        format!(
            "<html><head><title>t</title></head><body><nav>Menu</nav>\
             <article><p>{para}</p><p>{para}</p></article></body></html>"
        )
    }

    #[tokio::test]
    async fn test_fetch_article_sends_browser_user_agent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/story")
                .header("user-agent", DEFAULT_USER_AGENT);
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(long_article());
        });

        let article = local_client()
            .fetch_article(&server.url("/story"))
            .await
            .expect("fetch should succeed");
        mock.assert();
        assert_eq!(article.strategy, Some(StrategyKind::ArticleContainer));
        assert!(article.text.starts_with("Researchers measured"));
        assert!(!article.text.contains("Menu"));
    }

    #[tokio::test]
    async fn test_fetch_article_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("nope");
        });

        let err = local_client()
            .fetch_article(&server.url("/missing"))
            .await
            .expect_err("404 should fail");
        assert!(err.is_fetch());
        assert!(err.tagged().starts_with("ERROR:"));
    }

    #[tokio::test]
    async fn test_fetch_article_unreachable() {
        let err = local_client()
            .fetch_article("http://127.0.0.1:9/unreachable")
            .await
            .expect_err("connection should fail");
        assert!(err.is_fetch() || err.is_timeout());
    }

    #[tokio::test]
    async fn test_fetch_article_rejects_binary() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/doc.pdf");
            then.status(200)
                .header("content-type", "application/pdf")
                .body("%PDF-1.4");
        });

        let err = local_client()
            .fetch_article(&server.url("/doc.pdf"))
            .await
            .expect_err("pdf should be rejected");
        assert!(err.is_extract());
    }

    #[tokio::test]
    async fn test_fetch_article_times_out_with_caller_supplied_client() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_secs(3)).body("late");
        });

        let client = Client::builder()
            .allow_private_networks(true)
            .timeout(Duration::from_millis(300))
            .http_client(reqwest::Client::new())
            .build()
            .unwrap();
        let err = client
            .fetch_article(&server.url("/slow"))
            .await
            .expect_err("should time out");
        assert!(err.is_timeout());
    }

    #[test]
    fn test_extract_raw_markup() {
        let article = local_client().extract("<html><body><p>Hello there</p></body></html>");
        assert_eq!(article.text, "Hello there");
        assert_eq!(article.strategy, Some(StrategyKind::Body));
    }
}
