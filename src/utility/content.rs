
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use strum_macros::{Display, EnumIter};
use anyhow::{anyhow, Context};

use std::time::Duration;


#[derive(EnumIter, Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    YoMama,
    DadJoke,
    Dog,
    Duck,
    Cat,
    Meme,
    Joke,
}

impl ContentSource {

    pub fn trigger(&self) -> &'static str {
        match self {
            ContentSource::YoMama  => "yomama",
            ContentSource::DadJoke => "dadjoke",
            ContentSource::Dog     => "dog",
            ContentSource::Duck    => "duck",
            ContentSource::Cat     => "cat",
            ContentSource::Meme    => "meme",
            ContentSource::Joke    => "joke",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            ContentSource::YoMama  => "https://api.yomomma.info/",
            ContentSource::DadJoke => "https://icanhazdadjoke.com/",
            ContentSource::Dog     => "https://dog.ceo/api/breeds/image/random",
            ContentSource::Duck    => "https://random-d.uk/api/random",
            ContentSource::Cat     => "https://aws.random.cat/meow",
            ContentSource::Meme    => "https://meme-api.com/gimme",
            ContentSource::Joke    => "https://v2.jokeapi.dev/joke/Any?blacklistFlags=nsfw,racist,sexist,explicit&type=single",
        }
    }

    /// JSON field holding the reply.
    pub fn field(&self) -> &'static str {
        match self {
            ContentSource::YoMama | ContentSource::DadJoke | ContentSource::Joke => "joke",
            ContentSource::Dog                                                  => "message",
            ContentSource::Duck | ContentSource::Meme                           => "url",
            ContentSource::Cat                                                  => "file",
        }
    }

}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordRelation {
    #[strum(serialize = "Synonyms")]
    Synonym,
    #[strum(serialize = "Antonyms")]
    Antonym,
}

impl WordRelation {
    fn query_key(&self) -> &'static str {
        match self {
            WordRelation::Synonym => "rel_syn",
            WordRelation::Antonym => "rel_ant",
        }
    }
}

pub const WORD_LIMIT: usize = 10;

#[derive(Deserialize)]
struct WordEntry {
    word: Option<String>,
}

/// Disambiguation replies list at most this many articles.
pub const DISAMBIGUATION_OPTIONS: usize = 10;

#[derive(Deserialize)]
struct PageSummary {
    #[serde(rename = "type")]
    kind: Option<String>,
    title: Option<String>,
    extract: Option<String>,
}

#[derive(Deserialize)]
struct LinksResponse {
    query: Option<LinksQuery>,
}

#[derive(Deserialize)]
struct LinksQuery {
    #[serde(default)]
    pages: Vec<LinkedPage>,
}

#[derive(Deserialize)]
struct LinkedPage {
    #[serde(default)]
    links: Vec<PageLink>,
}

#[derive(Deserialize)]
struct PageLink {
    title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WikipediaLookup {
    Summary(String),
    /// The query named a disambiguation page; holds the articles it lists.
    Ambiguous(Vec<String>),
}

impl WikipediaLookup {
    pub fn ambiguity_message(options: &[String]) -> String {
        let base = "Could not determine what you meant, please be more specific.";
        match options.is_empty() {
            true  => base.to_string(),
            false => format!("{} Here are some options:\n{}", base, options.join(", ")),
        }
    }
}

pub fn extract_field(payload: &Value, field: &str) -> anyhow::Result<String> {
    match payload.get(field) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) if !other.is_null() => Ok(other.to_string()),
        _ => Err(anyhow!("response is missing the '{}' field", field)),
    }
}

pub fn extract_words(payload: &Value, limit: usize) -> Vec<String> {
    match Vec::<WordEntry>::deserialize(payload) {
        Ok(entries) => entries.into_iter()
            .filter_map(|entry| entry.word)
            .take(limit)
            .collect(),
        Err(_) => Vec::new()
    }
}

/// Article titles from a `prop=links` query, in page order.
pub fn extract_link_titles(payload: &Value, limit: usize) -> Vec<String> {
    match LinksResponse::deserialize(payload) {
        Ok(LinksResponse { query: Some(query) }) => query.pages.into_iter()
            .flat_map(|page| page.links)
            .map(|link| link.title)
            .take(limit)
            .collect(),
        _ => Vec::new()
    }
}

/// Keeps the first `sentences` sentences of a summary.
pub fn first_sentences(text: &str, sentences: usize) -> String {
    let mut taken = 0;
    for (index, _) in text.match_indices(". ") {
        taken += 1;
        if taken == sentences {
            return text[..=index].to_string();
        }
    }
    text.trim().to_string()
}

#[derive(Clone)]
pub struct ContentClient {
    http: reqwest::Client,
}

impl ContentClient {

    pub fn new() -> anyhow::Result<ContentClient> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(ContentClient { http })
    }

    async fn get_json(&self, url: Url) -> anyhow::Result<Value> {
        let response = self.http.get(url.clone())
            .header(ACCEPT, "application/json")
            .send().await
            .with_context(|| format!("GET {}", url))?
            .error_for_status()?;
        Ok(response.json::<Value>().await?)
    }

    pub async fn fetch(&self, source: ContentSource) -> anyhow::Result<String> {
        let payload = self.get_json(Url::parse(source.endpoint())?).await?;
        extract_field(&payload, source.field())
    }

    pub async fn related_words(&self, relation: WordRelation, word: &str) -> anyhow::Result<Vec<String>> {
        let url = Url::parse_with_params(
            "https://api.datamuse.com/words",
            &[(relation.query_key(), word)])?;
        let payload = self.get_json(url).await?;
        Ok(extract_words(&payload, WORD_LIMIT))
    }

    pub async fn wikipedia_summary(&self, query: &str) -> anyhow::Result<WikipediaLookup> {
        let mut url = Url::parse("https://en.wikipedia.org/api/rest_v1/page/summary/")?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("wikipedia endpoint cannot be a base"))?
            .pop_if_empty()
            .push(&query.replace(' ', "_"));
        let summary: PageSummary = serde_json::from_value(self.get_json(url).await?)?;
        if summary.kind.as_deref() == Some("disambiguation") {
            let title = summary.title.unwrap_or_else(|| query.to_string());
            return Ok(WikipediaLookup::Ambiguous(self.wikipedia_links(&title).await?));
        }
        match summary.extract {
            Some(extract) => Ok(WikipediaLookup::Summary(first_sentences(&extract, 2))),
            None          => Err(anyhow!("No article found for '{}'", query)),
        }
    }

    async fn wikipedia_links(&self, title: &str) -> anyhow::Result<Vec<String>> {
        let limit = DISAMBIGUATION_OPTIONS.to_string();
        let url = Url::parse_with_params("https://en.wikipedia.org/w/api.php", &[
            ("action", "query"),
            ("format", "json"),
            ("formatversion", "2"),
            ("prop", "links"),
            ("plnamespace", "0"),
            ("pllimit", limit.as_str()),
            ("redirects", "1"),
            ("titles", title),
        ])?;
        let payload = self.get_json(url).await?;
        Ok(extract_link_titles(&payload, DISAMBIGUATION_OPTIONS))
    }

}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    #[test]
    fn every_source_names_its_field() {
        for source in ContentSource::iter() {
            assert!(Url::parse(source.endpoint()).is_ok(), "{} endpoint", source);
            assert!(!source.field().is_empty());
        }
        assert_eq!(ContentSource::Cat.field(), "file");
        assert_eq!(ContentSource::Dog.field(), "message");
    }

    #[test]
    fn field_extraction() {
        let payload = json!({ "joke": "knock knock", "id": 3, "nothing": null });
        assert_eq!(extract_field(&payload, "joke").unwrap(), "knock knock");
        assert_eq!(extract_field(&payload, "id").unwrap(), "3");
        assert!(extract_field(&payload, "nothing").is_err());
        assert!(extract_field(&payload, "url").is_err());
    }

    #[test]
    fn word_lists_are_capped() {
        let payload = Value::Array((0..15).map(|i| json!({ "word": format!("w{}", i), "score": i })).collect());
        let words = extract_words(&payload, WORD_LIMIT);
        assert_eq!(words.len(), 10);
        assert_eq!(words[0], "w0");
        assert!(extract_words(&json!({ "error": true }), WORD_LIMIT).is_empty());
    }

    #[test]
    fn disambiguation_lists_up_to_ten_articles() {
        let links = (0..12).map(|i| json!({ "ns": 0, "title": format!("Mercury ({})", i) })).collect::<Vec<_>>();
        let payload = json!({ "query": { "pages": [ { "title": "Mercury", "links": links } ] } });

        let options = extract_link_titles(&payload, DISAMBIGUATION_OPTIONS);
        assert_eq!(options.len(), 10);
        assert_eq!(options[0], "Mercury (0)");
        assert!(extract_link_titles(&json!({ "batchcomplete": true }), DISAMBIGUATION_OPTIONS).is_empty());

        let message = WikipediaLookup::ambiguity_message(&options[..2]);
        assert_eq!(message, "Could not determine what you meant, please be more specific. \
            Here are some options:\nMercury (0), Mercury (1)");
        assert_eq!(WikipediaLookup::ambiguity_message(&[]),
            "Could not determine what you meant, please be more specific.");
    }

    #[test]
    fn summaries_keep_two_sentences() {
        assert_eq!(first_sentences("Rust is a language. It is fast. It is safe.", 2), "Rust is a language. It is fast.");
        assert_eq!(first_sentences("Only one.", 2), "Only one.");
    }
}
