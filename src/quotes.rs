use gloo_net::http::Request;
use log::warn;
use std::collections::HashMap;

/// One display quote with its tag strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub tags: Vec<String>,
}

/// Quotes per person and tags per item key, loaded from tab-delimited text.
/// Missing or unparsable sources degrade to empty; a card without a quote is
/// still a card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteBook {
    quotes: HashMap<String, Vec<Quote>>,
    tags: HashMap<String, Vec<String>>,
}

impl QuoteBook {
    pub fn new(quotes: HashMap<String, Vec<Quote>>, tags: HashMap<String, Vec<String>>) -> Self {
        Self { quotes, tags }
    }

    pub fn quotes_for(&self, person: &str) -> &[Quote] {
        self.quotes.get(person).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn tags_for(&self, item_key: &str) -> &[String] {
        self.tags.get(item_key).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn split_tags(field: &str) -> Vec<String> {
    field
        .split('|')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lines are `person<TAB>text[<TAB>tag|tag…]`. Blank lines, `#` comments and
/// lines with too few fields are skipped, never fatal.
pub fn parse_quotes(raw: &str) -> HashMap<String, Vec<Quote>> {
    let mut quotes: HashMap<String, Vec<Quote>> = HashMap::new();
    for line in raw.lines() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split('\t');
        let (Some(person), Some(text)) = (fields.next(), fields.next()) else {
            continue;
        };
        let person = person.trim();
        let text = text.trim();
        if person.is_empty() || text.is_empty() {
            continue;
        }
        quotes.entry(person.to_string()).or_default().push(Quote {
            text: text.to_string(),
            tags: fields.next().map(split_tags).unwrap_or_default(),
        });
    }
    quotes
}

/// Lines are `item-key<TAB>tag|tag…`, same tolerance as quotes.
pub fn parse_tags(raw: &str) -> HashMap<String, Vec<String>> {
    let mut tags: HashMap<String, Vec<String>> = HashMap::new();
    for line in raw.lines() {
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split('\t');
        let (Some(key), Some(field)) = (fields.next(), fields.next()) else {
            continue;
        };
        let key = key.trim();
        let parsed = split_tags(field);
        if key.is_empty() || parsed.is_empty() {
            continue;
        }
        tags.insert(key.to_string(), parsed);
    }
    tags
}

async fn fetch_text(url: &str) -> Option<String> {
    let response = match Request::get(url).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("Skipping {url}: {err}");
            return None;
        }
    };
    if !response.ok() {
        warn!("Skipping {url}: HTTP {}", response.status());
        return None;
    }
    response.text().await.ok()
}

/// Builds the book from the two metadata assets. Either source failing just
/// leaves its half of the book empty.
pub async fn fetch_quote_book(quotes_url: &str, tags_url: &str) -> QuoteBook {
    let quotes = match fetch_text(quotes_url).await {
        Some(raw) => parse_quotes(&raw),
        None => HashMap::new(),
    };
    let tags = match fetch_text(tags_url).await {
        Some(raw) => parse_tags(&raw),
        None => HashMap::new(),
    };
    QuoteBook::new(quotes, tags)
}
