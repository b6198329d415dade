use serde::{Deserialize, Serialize};

/// Extracted text of one document page, 1-indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    pub page: u32,
    pub text: String,
}

impl PageText {
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
        }
    }
}

/// How the page text was obtained. The evaluation core never branches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    Digital,
    Ocr,
}

/// Extraction metadata carried through to the report artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub method: ExtractionMethod,
    pub total_pages: u32,
    pub pages_with_content: u32,
    pub total_characters: usize,
    pub total_words: usize,
}

/// A text-extracted annual report, ready for compliance evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialDocument {
    pub id: String,
    pub filename: String,
    pub pages: Vec<PageText>, // Per-page text, in document order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction: Option<ExtractionStats>,
}

impl FinancialDocument {
    pub fn new(id: impl Into<String>, filename: impl Into<String>, pages: Vec<PageText>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            pages,
            extraction: None,
        }
    }

    /// Single-page document from raw text, for callers without a page map.
    pub fn from_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, "", vec![PageText::new(1, text)])
    }

    pub fn total_pages(&self) -> u32 {
        self.pages.len() as u32
    }
}

/// Verdict for a single disclosure check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    /// At least one keyword occurrence found.
    Compliant,
    /// Topic present (or check not section-linked) but the disclosure
    /// wording was not found.
    NonCompliant,
    /// Mandatory check whose entire linked section is absent.
    Missing,
}

/// One literal keyword occurrence supporting a verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub check_id: String,
    pub keyword: String,
    /// Bounded window of surrounding text, whitespace-collapsed.
    pub snippet: String,
    /// 1-indexed page of the occurrence, when page boundaries were tracked.
    pub page: Option<u32>,
}

/// Outcome of one check, created once per evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_id: String,
    pub standard_id: String,
    pub requirement: String,
    pub status: CheckStatus,
    pub mandatory: bool,
    pub weight: f64,
    pub matches: Vec<KeywordMatch>,
}

/// Qualitative rating derived from the weighted score.
/// Breakpoints (inclusive lower bounds) are the contract; labels are display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rating {
    Good,
    Fair,
    Poor,
    Critical,
}

impl Rating {
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            Rating::Good
        } else if score >= 50.0 {
            Rating::Fair
        } else if score >= 25.0 {
            Rating::Poor
        } else {
            Rating::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Good => "GOOD",
            Rating::Fair => "FAIR",
            Rating::Poor => "POOR",
            Rating::Critical => "NEEDS IMPROVEMENT",
        }
    }
}

/// Aggregate result of one evaluation run. Owned by the run, read-only to
/// renderers. Contains no timestamp so identical inputs serialize
/// byte-identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub document_id: String,
    pub total_checks: u32,
    pub compliant: u32,
    pub non_compliant: u32,
    pub missing: u32,
    pub total_weight: f64,
    pub achieved_weight: f64,
    /// Weighted score, 0-100, rounded to 2 decimals.
    pub score: f64,
    pub rating: Rating,
    /// One entry per check, in catalogue order.
    pub results: Vec<CheckResult>,
    /// One entry per failing check, high-priority standards first.
    pub recommendations: Vec<String>,
}
