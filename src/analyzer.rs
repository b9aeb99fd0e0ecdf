// src/analyzer.rs
//! External morphological analyzer boundary.
//!
//! The whole batch goes out as one `madamira_input` document: one segment
//! per item, immediately followed by one segment per hashtag of that item.
//! Responses correlate to requests strictly by position — there is no
//! identifier round trip — so the pipeline checks segment counts at this
//! seam and degrades instead of guessing.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use quick_xml::de::from_str;
use serde::{Deserialize, Serialize};

const MADAMIRA_NS: &str = "urn:edu.columbia.ccls.madamira.configuration:0.1";

/// One request segment per entry: whitespace-joined, already-normalized
/// token text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisRequest {
    pub segments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedWord {
    pub surface: String,
    /// Lemma with everything from the first `_` on discarded; falls back to
    /// the surface form when the analyzer had nothing.
    pub lemma: String,
    pub pos: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisResponse {
    pub segments: Vec<Vec<AnalyzedWord>>,
}

#[async_trait]
pub trait MorphAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse>;
    /// Implementation name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Trait-object alias used by the pipeline and the binary.
pub type DynAnalyzer = Arc<dyn MorphAnalyzer>;

// ------------------------------------------------------------
// Request document
// ------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename = "madamira_input")]
struct MadamiraInput<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'a str,
    madamira_configuration: Configuration<'a>,
    in_doc: InDoc<'a>,
}

#[derive(Debug, Serialize)]
struct Configuration<'a> {
    preprocessing: Preprocessing<'a>,
    overall_vars: OverallVars<'a>,
    requested_output: RequestedOutput<'a>,
}

#[derive(Debug, Serialize)]
struct Preprocessing<'a> {
    #[serde(rename = "@sentence_ids")]
    sentence_ids: &'a str,
    #[serde(rename = "@separate_punct")]
    separate_punct: &'a str,
    #[serde(rename = "@input_encoding")]
    input_encoding: &'a str,
}

#[derive(Debug, Serialize)]
struct OverallVars<'a> {
    #[serde(rename = "@output_encoding")]
    output_encoding: &'a str,
    #[serde(rename = "@dialect")]
    dialect: &'a str,
    #[serde(rename = "@output_analyses")]
    output_analyses: &'a str,
    #[serde(rename = "@morph_backoff")]
    morph_backoff: &'a str,
}

#[derive(Debug, Serialize)]
struct RequestedOutput<'a> {
    #[serde(rename = "req_variable")]
    variables: Vec<ReqVariable<'a>>,
}

#[derive(Debug, Serialize)]
struct ReqVariable<'a> {
    #[serde(rename = "@name")]
    name: &'a str,
    #[serde(rename = "@value")]
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct InDoc<'a> {
    #[serde(rename = "@id")]
    id: &'a str,
    #[serde(rename = "in_seg")]
    segments: Vec<InSeg<'a>>,
}

#[derive(Debug, Serialize)]
struct InSeg<'a> {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "$text")]
    text: &'a str,
}

/// Serialize the batch into one analyzer request document. Segment ids are
/// sequential; correlation still happens by position on the way back.
pub fn to_request_xml(request: &AnalysisRequest) -> Result<String> {
    let doc = MadamiraInput {
        xmlns: MADAMIRA_NS,
        madamira_configuration: Configuration {
            preprocessing: Preprocessing {
                sentence_ids: "true",
                separate_punct: "false",
                input_encoding: "UTF8",
            },
            overall_vars: OverallVars {
                output_encoding: "UTF8",
                dialect: "MSA",
                output_analyses: "TOP",
                morph_backoff: "NONE",
            },
            requested_output: RequestedOutput {
                variables: vec![
                    ReqVariable {
                        name: "PREPROCESSED",
                        value: "true",
                    },
                    ReqVariable {
                        name: "LEMMA",
                        value: "true",
                    },
                    ReqVariable {
                        name: "POS",
                        value: "true",
                    },
                ],
            },
        },
        in_doc: InDoc {
            id: "batch",
            segments: request
                .segments
                .iter()
                .enumerate()
                .map(|(i, text)| InSeg {
                    id: format!("SEG{i}"),
                    text,
                })
                .collect(),
        },
    };
    quick_xml::se::to_string(&doc).context("serializing analyzer request")
}

// ------------------------------------------------------------
// Response document
// ------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MadamiraOutput {
    out_doc: OutDoc,
}

#[derive(Debug, Deserialize)]
struct OutDoc {
    #[serde(rename = "out_seg", default)]
    segments: Vec<OutSeg>,
}

#[derive(Debug, Deserialize)]
struct OutSeg {
    word_info: Option<WordInfo>,
}

#[derive(Debug, Deserialize)]
struct WordInfo {
    #[serde(rename = "word", default)]
    words: Vec<WordNode>,
}

#[derive(Debug, Deserialize)]
struct WordNode {
    #[serde(rename = "@word")]
    word: String,
    svm_prediction: Option<SvmPrediction>,
}

#[derive(Debug, Deserialize)]
struct SvmPrediction {
    morph_feature_set: Option<MorphFeatureSet>,
}

#[derive(Debug, Deserialize)]
struct MorphFeatureSet {
    #[serde(rename = "@lemma")]
    lemma: Option<String>,
    #[serde(rename = "@pos")]
    pos: Option<String>,
}

fn clean_lemma(raw: &str) -> &str {
    raw.split('_').next().unwrap_or(raw)
}

/// Parse one analyzer response document into per-segment word lists, one
/// response segment per request segment, in document order.
pub fn parse_response_xml(xml: &str) -> Result<AnalysisResponse> {
    let doc: MadamiraOutput = from_str(xml).context("parsing analyzer response")?;
    let segments = doc
        .out_doc
        .segments
        .into_iter()
        .map(|segment| {
            segment
                .word_info
                .map(|info| {
                    info.words
                        .into_iter()
                        .map(|node| {
                            let morph = node.svm_prediction.and_then(|p| p.morph_feature_set);
                            match morph {
                                Some(m) => {
                                    let lemma = match m.lemma.as_deref() {
                                        Some(raw) => clean_lemma(raw).to_string(),
                                        None => node.word.clone(),
                                    };
                                    AnalyzedWord {
                                        lemma,
                                        pos: m.pos,
                                        surface: node.word,
                                    }
                                }
                                None => AnalyzedWord {
                                    lemma: node.word.clone(),
                                    pos: None,
                                    surface: node.word,
                                },
                            }
                        })
                        .collect()
                })
                .unwrap_or_default()
        })
        .collect();
    Ok(AnalysisResponse { segments })
}

// ------------------------------------------------------------
// Implementations
// ------------------------------------------------------------

/// HTTP client for a running MADAMIRA server.
pub struct MadamiraClient {
    http: reqwest::Client,
    url: String,
}

impl MadamiraClient {
    pub fn new(url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("arabic-tweet-sentiment/0.1")
            .build()
            .unwrap_or_default();
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl MorphAnalyzer for MadamiraClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        let body = to_request_xml(request)?;
        let response = self
            .http
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/xml; charset=utf-8")
            .body(body)
            .send()
            .await
            .context("sending analyzer request")?;
        let status = response.status();
        if !status.is_success() {
            bail!("analyzer returned {status}");
        }
        let text = response
            .text()
            .await
            .context("reading analyzer response")?;
        parse_response_xml(&text)
    }

    fn name(&self) -> &'static str {
        "madamira-http"
    }
}

/// No-op analyzer: every request yields an empty response, which downstream
/// treats as fully degraded output (all lemma-derived blocks zero).
pub struct DisabledAnalyzer;

#[async_trait]
impl MorphAnalyzer for DisabledAnalyzer {
    async fn analyze(&self, _request: &AnalysisRequest) -> Result<AnalysisResponse> {
        Ok(AnalysisResponse::default())
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Offline stand-in: echoes each surface token back as its own lemma with no
/// POS tag. Used by tests and when no analyzer endpoint is configured.
pub struct EchoAnalyzer;

#[async_trait]
impl MorphAnalyzer for EchoAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        let segments = request
            .segments
            .iter()
            .map(|segment| {
                segment
                    .split_whitespace()
                    .map(|word| AnalyzedWord {
                        surface: word.to_string(),
                        lemma: word.to_string(),
                        pos: None,
                    })
                    .collect()
            })
            .collect();
        Ok(AnalysisResponse { segments })
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}
