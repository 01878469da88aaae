//! Bing Web Search client

use std::time::Duration;

use serde::Deserialize;

use crate::{
    config::SearchConfig,
    error::{AppError, AppResult},
    models::search::SearchResult,
};

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Debug, Deserialize)]
struct BingResponse {
    #[serde(rename = "webPages")]
    web_pages: Option<BingWebPages>,
}

#[derive(Debug, Deserialize)]
struct BingWebPages {
    #[serde(default)]
    value: Vec<BingWebPage>,
}

#[derive(Debug, Deserialize)]
struct BingWebPage {
    name: String,
    url: String,
    #[serde(default)]
    snippet: String,
}

/// Map a Bing v7 response body to search results
fn parse_results(body: &str) -> AppResult<Vec<SearchResult>> {
    let response: BingResponse = serde_json::from_str(body)
        .map_err(|e| AppError::Search(format!("Unexpected search response: {}", e)))?;

    Ok(response
        .web_pages
        .map(|pages| {
            pages
                .value
                .into_iter()
                .map(|page| SearchResult {
                    title: page.name,
                    link: page.url,
                    summary: page.snippet,
                })
                .collect()
        })
        .unwrap_or_default())
}

/// First line of the key file, trimmed
pub fn read_key_file(path: &str) -> AppResult<String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| AppError::Search(format!("{} file not found: {}", path, e)))?;
    let key = contents.lines().next().unwrap_or("").trim().to_string();
    if key.is_empty() {
        return Err(AppError::Search("Bing key not found".to_string()));
    }
    Ok(key)
}

#[derive(Clone)]
pub struct SearchService {
    client: reqwest::Client,
    config: SearchConfig,
}

impl SearchService {
    pub fn new(config: SearchConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    fn api_key(&self) -> AppResult<String> {
        match self.config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key.to_string()),
            _ => read_key_file(&self.config.key_file),
        }
    }

    /// Run a web search; blank terms return no results without a request
    pub async fn run_query(&self, terms: &str) -> AppResult<Vec<SearchResult>> {
        let terms = terms.trim();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let key = self.api_key()?;
        tracing::debug!("Web search: {}", terms);

        let mut params = vec![
            ("q", terms.to_string()),
            ("textDecorations", "true".to_string()),
            ("textFormat", "HTML".to_string()),
        ];
        if let Some(market) = &self.config.market {
            params.push(("mkt", market.clone()));
        }

        let response = self
            .client
            .get(&self.config.endpoint)
            .header(SUBSCRIPTION_KEY_HEADER, key)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Search request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Search API returned {}", status);
            return Err(AppError::Search(format!("Search API returned {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Search(format!("Failed to read search response: {}", e)))?;
        let results = parse_results(&body)?;
        tracing::info!("Web search returned {} result(s)", results.len());
        Ok(results)
    }
}
