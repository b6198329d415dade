//! Rule catalogue: standards, checks, keyword sets, priorities and weights.
//!
//! The catalogue is an explicit immutable value handed to the engine, loaded
//! and validated once before any evaluation runs. Validation is fail-fast: a
//! self-inconsistent catalogue invalidates every verdict it would produce.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::sections::SectionKind;

/// Standard priority tier. Used only for display grouping and recommendation
/// ordering; it never feeds the score formula.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    #[default]
    Medium,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
        }
    }
}

/// One atomic disclosure requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    pub id: String,
    pub requirement: String,
    /// Case-insensitive phrases; any occurrence satisfies the check.
    pub keywords: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default = "default_mandatory")]
    pub mandatory: bool,
    /// Document section this check is tied to, if any. A mandatory check
    /// whose section is absent reports MISSING instead of NON_COMPLIANT.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionKind>,
}

fn default_weight() -> f64 {
    1.0
}

fn default_mandatory() -> bool {
    true
}

/// A named regulatory source grouping related checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standard {
    pub id: String,
    pub name: String,
    pub category: String,
    pub priority: Priority,
    pub checks: Vec<Check>,
}

/// Validated, immutable collection of standards.
#[derive(Debug, Clone, Serialize)]
pub struct RuleCatalog {
    standards: Vec<Standard>,
}

impl RuleCatalog {
    /// Validate and seal a catalogue. Check ids must be unique across the
    /// whole catalogue, not just within a standard.
    pub fn new(standards: Vec<Standard>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for standard in &standards {
            for check in &standard.checks {
                if !seen.insert(check.id.as_str()) {
                    return Err(CatalogError::DuplicateCheckId(check.id.clone()));
                }
            }
        }
        Ok(Self { standards })
    }

    /// Load a catalogue from a rules JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse a catalogue from rules JSON: an object keyed by standard id.
    /// Standards load in sorted-id order so repeated loads are
    /// deterministic; checks keep their file order.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, RawStandard> = serde_json::from_str(json)?;

        let mut standards = Vec::with_capacity(raw.len());
        for (id, body) in raw {
            let mut checks = Vec::with_capacity(body.checks.len());
            for check in body.checks {
                let section = match check.section {
                    Some(name) => Some(SectionKind::parse(&name).ok_or_else(|| {
                        CatalogError::UnknownSection {
                            check_id: check.id.clone(),
                            section: name,
                        }
                    })?),
                    None => None,
                };
                checks.push(Check {
                    id: check.id,
                    requirement: check.requirement,
                    keywords: check.keywords,
                    weight: check.weight,
                    mandatory: check.mandatory,
                    section,
                });
            }
            standards.push(Standard {
                id,
                name: body.name,
                category: body.category,
                priority: body.priority,
                checks,
            });
        }

        let catalog = Self::new(standards)?;
        tracing::debug!(
            standards = catalog.standards.len(),
            checks = catalog.total_checks(),
            "rule catalogue loaded"
        );
        Ok(catalog)
    }

    pub fn standards(&self) -> &[Standard] {
        &self.standards
    }

    pub fn total_checks(&self) -> usize {
        self.standards.iter().map(|s| s.checks.len()).sum()
    }

    /// Built-in IndAS/SEBI disclosure catalogue, used when no rules file is
    /// supplied.
    pub fn builtin() -> Self {
        let standards = vec![
            Standard {
                id: "IndAS-1".to_string(),
                name: "Presentation of Financial Statements".to_string(),
                category: "financial_statements".to_string(),
                priority: Priority::High,
                checks: vec![
                    check(
                        "IndAS1-1",
                        "Balance Sheet",
                        &["balance sheet", "statement of financial position"],
                        10.0,
                        true,
                        Some(SectionKind::BalanceSheet),
                    ),
                    check(
                        "IndAS1-2",
                        "Statement of Profit and Loss",
                        &["profit and loss", "income statement"],
                        10.0,
                        true,
                        Some(SectionKind::ProfitAndLoss),
                    ),
                    check(
                        "IndAS1-3",
                        "Statement of Changes in Equity",
                        &["changes in equity"],
                        5.0,
                        true,
                        Some(SectionKind::EquityChanges),
                    ),
                    check(
                        "IndAS1-4",
                        "Notes to Financial Statements",
                        &[
                            "notes to accounts",
                            "notes to financial statements",
                            "notes to the financial statements",
                            "significant accounting policies",
                        ],
                        5.0,
                        true,
                        Some(SectionKind::NotesToAccounts),
                    ),
                ],
            },
            Standard {
                id: "IndAS-7".to_string(),
                name: "Statement of Cash Flows".to_string(),
                category: "financial_statements".to_string(),
                priority: Priority::High,
                checks: vec![
                    check(
                        "IndAS7-1",
                        "Statement of Cash Flows",
                        &["cash flow statement", "statement of cash flows"],
                        10.0,
                        true,
                        Some(SectionKind::CashFlow),
                    ),
                    check(
                        "IndAS7-2",
                        "Activity Classification",
                        &[
                            "operating activities",
                            "investing activities",
                            "financing activities",
                        ],
                        5.0,
                        true,
                        Some(SectionKind::CashFlow),
                    ),
                ],
            },
            Standard {
                id: "IndAS-16".to_string(),
                name: "Property, Plant and Equipment".to_string(),
                category: "assets".to_string(),
                priority: Priority::Medium,
                checks: vec![
                    check(
                        "IndAS16-1",
                        "Property, Plant and Equipment Disclosure",
                        &["property, plant and equipment", "gross block"],
                        5.0,
                        true,
                        Some(SectionKind::NotesToAccounts),
                    ),
                    check(
                        "IndAS16-2",
                        "Depreciation Disclosure",
                        &["depreciation", "accumulated depreciation"],
                        3.0,
                        false,
                        Some(SectionKind::NotesToAccounts),
                    ),
                ],
            },
            Standard {
                id: "IndAS-24".to_string(),
                name: "Related Party Disclosures".to_string(),
                category: "disclosures".to_string(),
                priority: Priority::Medium,
                checks: vec![check(
                    "IndAS24-1",
                    "Related Party Transactions",
                    &[
                        "related party",
                        "related parties",
                        "key management personnel",
                    ],
                    5.0,
                    true,
                    Some(SectionKind::NotesToAccounts),
                )],
            },
            Standard {
                id: "SA-700".to_string(),
                name: "Independent Auditor's Report".to_string(),
                category: "audit".to_string(),
                priority: Priority::High,
                checks: vec![
                    check(
                        "SA700-1",
                        "Auditor's Report",
                        &["independent auditor", "auditor's report"],
                        10.0,
                        true,
                        Some(SectionKind::AuditorReport),
                    ),
                    check(
                        "SA700-2",
                        "Basis for Opinion",
                        &["basis for opinion", "key audit matters"],
                        5.0,
                        false,
                        Some(SectionKind::AuditorReport),
                    ),
                ],
            },
            Standard {
                id: "SEBI-LODR".to_string(),
                name: "Listing Obligations and Disclosure Requirements".to_string(),
                category: "governance".to_string(),
                priority: Priority::Medium,
                checks: vec![
                    check(
                        "LODR-1",
                        "Corporate Governance Report",
                        &["corporate governance"],
                        5.0,
                        true,
                        Some(SectionKind::CorporateGovernance),
                    ),
                    check(
                        "LODR-2",
                        "Management Discussion and Analysis",
                        &["management discussion"],
                        5.0,
                        true,
                        Some(SectionKind::ManagementDiscussion),
                    ),
                    check(
                        "LODR-3",
                        "Director's Report",
                        &["director's report", "board's report", "directors' report"],
                        5.0,
                        true,
                        Some(SectionKind::DirectorsReport),
                    ),
                ],
            },
        ];

        Self::new(standards).expect("built-in rule catalogue is valid")
    }
}

fn check(
    id: &str,
    requirement: &str,
    keywords: &[&str],
    weight: f64,
    mandatory: bool,
    section: Option<SectionKind>,
) -> Check {
    Check {
        id: id.to_string(),
        requirement: requirement.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        weight,
        mandatory,
        section,
    }
}

/// File-side model: the rules JSON keys standards by id and stores the
/// section link as a plain string so a bad name surfaces as a catalogue
/// error naming the offending check, not as an opaque parse failure.
#[derive(Deserialize)]
struct RawStandard {
    name: String,
    #[serde(default = "default_category")]
    category: String,
    #[serde(default)]
    priority: Priority,
    checks: Vec<RawCheck>,
}

#[derive(Deserialize)]
struct RawCheck {
    id: String,
    requirement: String,
    keywords: Vec<String>,
    #[serde(default = "default_weight")]
    weight: f64,
    #[serde(default = "default_mandatory")]
    mandatory: bool,
    #[serde(default)]
    section: Option<String>,
}

fn default_category() -> String {
    "general".to_string()
}
