//! Pluggable fetch/parse strategies.
//!
//! # Responsibility
//! - Retrieve the raw body for an endpoint URL (`Fetcher`).
//! - Decode a raw body into event records (`Parser`).
//!
//! # Invariants
//! - Both strategies report failures as `ClientError`; neither panics on
//!   bad input.
//! - Closures with matching signatures can be injected in place of the
//!   default HTTP/JSON implementations.

use crate::client::{ClientError, ClientResult, Deadline};
use crate::model::event::EventRecord;
use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;

/// Retrieves the raw response body for one endpoint URL.
pub trait Fetcher {
    fn fetch(&self, url: &Url, deadline: Deadline) -> ClientResult<String>;
}

impl<F> Fetcher for F
where
    F: Fn(&Url, Deadline) -> ClientResult<String>,
{
    fn fetch(&self, url: &Url, deadline: Deadline) -> ClientResult<String> {
        self(url, deadline)
    }
}

/// Decodes a raw response body into event records.
pub trait Parser {
    fn parse(&self, body: &str) -> ClientResult<Vec<EventRecord>>;
}

impl<F> Parser for F
where
    F: Fn(&str) -> ClientResult<Vec<EventRecord>>,
{
    fn parse(&self, body: &str) -> ClientResult<Vec<EventRecord>> {
        self(body)
    }
}

/// Blocking HTTP GET fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests never exceed `timeout`.
    pub fn new(timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|err| ClientError::Transport(format!("http client build failed: {err}")))?;
        Ok(Self { client, timeout })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url, deadline: Deadline) -> ClientResult<String> {
        let timeout = deadline
            .clamp(self.timeout)
            .ok_or(ClientError::DeadlineExceeded)?;
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .map_err(|err| ClientError::Transport(format!("GET failed: {err}")))?;
        if !response.status().is_success() {
            return Err(ClientError::HttpStatus(response.status().as_u16()));
        }
        response
            .text()
            .map_err(|err| ClientError::Transport(format!("body read failed: {err}")))
    }
}

/// JSON array decoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, body: &str) -> ClientResult<Vec<EventRecord>> {
        serde_json::from_str(body).map_err(|err| ClientError::Parse(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonParser, Parser};
    use crate::client::ClientResult;
    use crate::model::event::EventRecord;

    #[test]
    fn json_parser_accepts_array_of_objects() {
        let records = JsonParser
            .parse(r#"[{"title":"a","start_time":"2024-03-10"},{"title":"b"}]"#)
            .expect("array should decode");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].raw_start_time(), Some("2024-03-10"));
        assert_eq!(records[1].raw_start_time(), None);
    }

    #[test]
    fn json_parser_rejects_non_array_bodies() {
        assert!(JsonParser.parse("false").unwrap_err().is_parse());
        assert!(JsonParser.parse(r#"{"error":"bad token"}"#).unwrap_err().is_parse());
        assert!(JsonParser.parse("[1, 2]").unwrap_err().is_parse());
        assert!(JsonParser.parse("<html>").unwrap_err().is_parse());
    }

    #[test]
    fn closures_act_as_parsers() {
        let parser = |_: &str| -> ClientResult<Vec<EventRecord>> { Ok(Vec::new()) };
        assert!(parser.parse("anything").expect("closure parser").is_empty());
    }
}
