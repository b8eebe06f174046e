//! The per-line parse cache.
//!
//! Plugins frequently want the same parse of the same message: the first
//! plugin to need a parser runs it and the result is memoized for the rest
//! of the plugin run. The cache is created by the dispatcher for one line
//! and discarded when that line's decode finishes.
use crate::payload;
use indexmap::IndexMap;
use serde_json::{Map, Value};

type Fields = IndexMap<String, String>;

/// Memoized payload parses for the line currently being decoded. One slot
/// per parser kind; a slot holding `Some(None)` records that the parser
/// already failed, so it is not retried.
#[derive(Debug, Default)]
pub struct ParseCache {
    cef: Option<Option<Fields>>,
    leef1: Option<Option<Fields>>,
    leef2: Option<Option<Fields>>,
    kv: Option<Option<Fields>>,
    csv: Option<Option<Vec<String>>>,
    json: Option<Option<Map<String, Value>>>,
    xml: Option<Option<Map<String, Value>>>,
}

impl ParseCache {
    pub fn cef(&mut self, message: &str) -> Option<&Fields> {
        self.cef
            .get_or_insert_with(|| payload::cef::parse_cef(message))
            .as_ref()
    }

    pub fn leef1(&mut self, message: &str) -> Option<&Fields> {
        self.leef1
            .get_or_insert_with(|| payload::leef1::parse_leef1(message))
            .as_ref()
    }

    pub fn leef2(&mut self, message: &str) -> Option<&Fields> {
        self.leef2
            .get_or_insert_with(|| payload::leef2::parse_leef2(message))
            .as_ref()
    }

    pub fn kv(&mut self, message: &str) -> Option<&Fields> {
        self.kv
            .get_or_insert_with(|| payload::kv::parse_kv(message))
            .as_ref()
    }

    pub fn csv(&mut self, message: &str) -> Option<&Vec<String>> {
        self.csv
            .get_or_insert_with(|| payload::csv::parse_quoted_csv(message))
            .as_ref()
    }

    pub fn json(&mut self, message: &str) -> Option<&Map<String, Value>> {
        self.json
            .get_or_insert_with(|| payload::json::parse_json(message))
            .as_ref()
    }

    pub fn xml(&mut self, message: &str) -> Option<&Map<String, Value>> {
        self.xml
            .get_or_insert_with(|| payload::xml::parse_xml(message))
            .as_ref()
    }
}
