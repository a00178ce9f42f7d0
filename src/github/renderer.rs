use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::config::MinerConfig;
use crate::credentials::Credentials;
use crate::error::{Error, Result};

/// One retrieved search-results page: the repository names extracted from
/// it plus the raw document kept for audit.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub repositories: Vec<String>,
    pub html: String,
}

/// Capability to establish a logged-in session and retrieve rendered
/// code search pages. Isolating this lets the pagination, dedup and
/// stop-condition logic run against canned fixtures.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<()>;
    async fn search_page(&self, query: &str, page: u32) -> Result<RenderedPage>;
}

/// Session-based implementation. The cookie store carries the login
/// session across requests.
pub struct HttpRenderer {
    client: Client,
    base_url: String,
}

impl HttpRenderer {
    pub fn new(config: &MinerConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent("lfsminer/0.1")
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.web_base_url.clone(),
        })
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn login(&self, credentials: &Credentials) -> Result<()> {
        let login_url = format!("{}/login", self.base_url);
        let login_page = self.client.get(&login_url).send().await?.text().await?;

        let token = extract_authenticity_token(&login_page)?
            .ok_or_else(|| Error::Crawl("login form has no authenticity token".to_string()))?;

        let form = [
            ("login", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("authenticity_token", token.as_str()),
            ("commit", "Sign in"),
        ];
        let response = self
            .client
            .post(format!("{}/session", self.base_url))
            .form(&form)
            .send()
            .await?;

        // After a successful sign-in the redirect chain leaves the login
        // pages behind; still being on one means the credentials were
        // rejected.
        if response.url().as_str().to_lowercase().contains("login") {
            return Err(Error::LoginFailed(credentials.username.clone()));
        }

        tracing::info!("Login to GitHub successful.");
        Ok(())
    }

    async fn search_page(&self, query: &str, page: u32) -> Result<RenderedPage> {
        let url = format!(
            "{}/search?q={}&type=Code&p={}",
            self.base_url, query, page
        );
        tracing::info!("Visiting {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Error::Crawl(format!(
                "code search page {} returned {}",
                page,
                response.status()
            )));
        }

        let html = response.text().await?;
        let repositories = extract_repository_anchors(&html)?;
        Ok(RenderedPage { repositories, html })
    }
}

/// The repository names sit in anchor elements carrying the "text-bold"
/// class marker.
pub(crate) fn extract_repository_anchors(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a.text-bold")
        .map_err(|e| Error::Selector(format!("a.text-bold: {}", e)))?;

    Ok(document
        .select(&selector)
        .map(|anchor| anchor.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect())
}

fn extract_authenticity_token(html: &str) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"input[name="authenticity_token"]"#)
        .map_err(|e| Error::Selector(format!("authenticity_token input: {}", e)))?;

    Ok(document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_repository_anchors() {
        let html = r#"
            <html><body>
              <a class="text-bold" href="/octocat/Hello-World">octocat/Hello-World</a>
              <a class="muted-link" href="/elsewhere">not a repository</a>
              <a class="f4 text-bold" href="/rails/rails">rails/rails</a>
            </body></html>
        "#;
        let names = extract_repository_anchors(html).unwrap();
        assert_eq!(names, vec!["octocat/Hello-World", "rails/rails"]);
    }

    #[test]
    fn test_extract_repository_anchors_none_found() {
        let html = "<html><body><p>You have triggered an abuse detection mechanism.</p></body></html>";
        assert!(extract_repository_anchors(html).unwrap().is_empty());
    }

    #[test]
    fn test_extract_authenticity_token() {
        let html = r#"
            <form action="/session" method="post">
              <input type="hidden" name="authenticity_token" value="abc123==" />
              <input type="text" name="login" />
            </form>
        "#;
        let token = extract_authenticity_token(html).unwrap();
        assert_eq!(token.as_deref(), Some("abc123=="));
    }

    #[test]
    fn test_extract_authenticity_token_missing() {
        assert_eq!(extract_authenticity_token("<html></html>").unwrap(), None);
    }
}
