// otodom.rs
use crate::scraper::models::{Ad, SearchItem};
use crate::scraper::FetchError;
use log::debug;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use serde_json::Value;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36";

const SEARCH_URL: &str =
    "https://www.otodom.pl/pl/wyniki/wynajem/mieszkanie/mazowieckie/warszawa/warszawa/warszawa";
const OFFER_BASE_URL: &str = "https://www.otodom.pl/pl/oferta/";

// Search filter: fresh 2-3 room rentals in the target price band that
// mention the metro.
const SEARCH_PARAMS: &[(&str, &str)] = &[
    ("limit", "36"),
    ("description", "metro"),
    ("priceMin", "3000"),
    ("priceMax", "6000"),
    ("daysSinceCreated", "1"),
    ("roomsNumber", "[TWO,THREE]"),
    ("by", "DEFAULT"),
    ("direction", "DESC"),
    ("viewType", "listing"),
];

pub struct OtodomScraper {
    client: Client,
}

impl OtodomScraper {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Current search-results page as (id, slug) pairs.
    pub fn fetch_search_items(&self) -> Result<Vec<SearchItem>, FetchError> {
        let html = self.fetch_html(SEARCH_URL, SEARCH_PARAMS)?;
        let data = extract_next_data(&html)?;
        parse_search_payload(&data)
    }

    /// Full detail payload for a single offer.
    pub fn fetch_offer(&self, slug: &str) -> Result<Ad, FetchError> {
        let url = Url::parse(OFFER_BASE_URL)
            .and_then(|base| base.join(slug))
            .map_err(|e| FetchError::Network(format!("invalid offer url for '{slug}': {e}")))?;

        let html = self.fetch_html(url.as_str(), &[])?;
        let data = extract_next_data(&html)?;
        parse_offer_payload(data)
    }

    fn fetch_html(&self, url: &str, params: &[(&str, &str)]) -> Result<String, FetchError> {
        debug!("GET {url}");

        let resp = self
            .client
            .get(url)
            .query(params)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::Network(format!("HTTP {status} for {url}")));
        }

        Ok(text)
    }
}

/// The portal embeds its full page state as JSON in a
/// `<script id="__NEXT_DATA__">` tag.
fn extract_next_data(html: &str) -> Result<Value, FetchError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"script[id="__NEXT_DATA__"]"#)
        .map_err(|e| FetchError::HtmlParse(e.to_string()))?;

    let element = document
        .select(&selector)
        .next()
        .ok_or(FetchError::MissingNextData)?;

    let json_text = element.text().next().ok_or(FetchError::MissingNextData)?;
    let data: Value =
        serde_json::from_str(json_text.trim()).map_err(|e| FetchError::JsonParse(e.to_string()))?;
    Ok(data)
}

fn parse_search_payload(data: &Value) -> Result<Vec<SearchItem>, FetchError> {
    let items = data["props"]["pageProps"]["data"]["searchAds"]["items"]
        .as_array()
        .ok_or_else(|| FetchError::UnexpectedShape("searchAds.items missing".to_string()))?;

    let items: Result<Vec<_>, _> = items
        .iter()
        .map(|v| serde_json::from_value(v.clone()))
        .collect();

    items.map_err(|e| FetchError::Deserialize(e.to_string()))
}

fn parse_offer_payload(data: Value) -> Result<Ad, FetchError> {
    let ad = &data["props"]["pageProps"]["ad"];
    if ad.is_null() {
        return Err(FetchError::UnexpectedShape("ad missing".to_string()));
    }

    serde_json::from_value(ad.clone()).map_err(|e| FetchError::Deserialize(e.to_string()))
}
