//! Section index: locates the major structural parts of an annual report
//! (balance sheet, auditor's report, ...) by pattern matching over page text.
//!
//! Building the index never fails. A section that matches nowhere is simply
//! absent from the index; it is a reportable outcome, not an error.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use shared_types::PageText;

/// The fixed set of document sections the index tracks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    BalanceSheet,
    ProfitAndLoss,
    CashFlow,
    EquityChanges,
    NotesToAccounts,
    AuditorReport,
    DirectorsReport,
    CorporateGovernance,
    ManagementDiscussion,
}

impl SectionKind {
    pub const ALL: [SectionKind; 9] = [
        SectionKind::BalanceSheet,
        SectionKind::ProfitAndLoss,
        SectionKind::CashFlow,
        SectionKind::EquityChanges,
        SectionKind::NotesToAccounts,
        SectionKind::AuditorReport,
        SectionKind::DirectorsReport,
        SectionKind::CorporateGovernance,
        SectionKind::ManagementDiscussion,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::BalanceSheet => "Balance Sheet",
            SectionKind::ProfitAndLoss => "Statement of Profit and Loss",
            SectionKind::CashFlow => "Cash Flow Statement",
            SectionKind::EquityChanges => "Statement of Changes in Equity",
            SectionKind::NotesToAccounts => "Notes to Accounts",
            SectionKind::AuditorReport => "Auditor's Report",
            SectionKind::DirectorsReport => "Director's Report",
            SectionKind::CorporateGovernance => "Corporate Governance Report",
            SectionKind::ManagementDiscussion => "Management Discussion and Analysis",
        }
    }

    /// Parse the snake_case key used in rule catalogue files.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "balance_sheet" => Some(SectionKind::BalanceSheet),
            "profit_and_loss" | "profit_loss" => Some(SectionKind::ProfitAndLoss),
            "cash_flow" => Some(SectionKind::CashFlow),
            "equity_changes" => Some(SectionKind::EquityChanges),
            "notes_to_accounts" | "notes" => Some(SectionKind::NotesToAccounts),
            "auditor_report" => Some(SectionKind::AuditorReport),
            "directors_report" => Some(SectionKind::DirectorsReport),
            "corporate_governance" => Some(SectionKind::CorporateGovernance),
            "management_discussion" => Some(SectionKind::ManagementDiscussion),
            _ => None,
        }
    }
}

lazy_static! {
    /// Recognition patterns per section. Multiple phrasings per section
    /// absorb the wording differences between filers.
    static ref SECTION_PATTERNS: Vec<(SectionKind, Vec<Regex>)> = vec![
        (
            SectionKind::BalanceSheet,
            vec![
                Regex::new(r"(?i)balance\s+sheet").unwrap(),
                Regex::new(r"(?i)statement\s+of\s+financial\s+position").unwrap(),
            ],
        ),
        (
            SectionKind::ProfitAndLoss,
            vec![
                Regex::new(r"(?i)profit\s+and\s+loss").unwrap(),
                Regex::new(r"(?i)income\s+statement").unwrap(),
            ],
        ),
        (
            SectionKind::CashFlow,
            vec![
                Regex::new(r"(?i)cash\s+flow\s+statement").unwrap(),
                Regex::new(r"(?i)statement\s+of\s+cash\s+flows").unwrap(),
            ],
        ),
        (
            SectionKind::EquityChanges,
            vec![Regex::new(r"(?i)changes\s+in\s+equity").unwrap()],
        ),
        (
            SectionKind::NotesToAccounts,
            vec![
                Regex::new(r"(?i)notes\s+to\s+accounts").unwrap(),
                Regex::new(r"(?i)notes\s+forming\s+part").unwrap(),
                Regex::new(r"(?i)notes\s+to\s+(the\s+)?financial\s+statements").unwrap(),
            ],
        ),
        (
            SectionKind::AuditorReport,
            vec![
                Regex::new(r"(?i)independent\s+auditor").unwrap(),
                Regex::new(r"(?i)auditor'?s\s+report").unwrap(),
                Regex::new(r"(?i)report\s+of\s+the\s+statutory\s+auditors").unwrap(),
            ],
        ),
        (
            SectionKind::DirectorsReport,
            vec![
                Regex::new(r"(?i)directors?'?\s+report").unwrap(),
                Regex::new(r"(?i)board'?s\s+report").unwrap(),
            ],
        ),
        (
            SectionKind::CorporateGovernance,
            vec![
                Regex::new(r"(?i)corporate\s+governance\s+report").unwrap(),
                Regex::new(r"(?i)report\s+on\s+corporate\s+governance").unwrap(),
            ],
        ),
        (
            SectionKind::ManagementDiscussion,
            vec![
                Regex::new(r"(?i)management\s+discussion").unwrap(),
                Regex::new(r"(?i)md\s*&\s*a").unwrap(),
            ],
        ),
    ];
}

/// Page range of a located section, 1-indexed and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpan {
    pub start_page: u32,
    pub end_page: u32,
}

/// Sections located in a document. Sections can overlap: running headers
/// repeat across pages, so two sections may legitimately claim the same page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionIndex {
    sections: BTreeMap<SectionKind, SectionSpan>,
}

impl SectionIndex {
    /// Scan every page against every section's patterns. The first matching
    /// page becomes the span start and the last matching page anywhere in
    /// the document becomes the end, so non-contiguous repeats extend the
    /// span rather than splitting it.
    pub fn build(pages: &[PageText]) -> Self {
        let mut sections = BTreeMap::new();

        for (kind, patterns) in SECTION_PATTERNS.iter() {
            for page in pages {
                if patterns.iter().any(|p| p.is_match(&page.text)) {
                    sections
                        .entry(*kind)
                        .and_modify(|span: &mut SectionSpan| span.end_page = page.page)
                        .or_insert(SectionSpan {
                            start_page: page.page,
                            end_page: page.page,
                        });
                }
            }
        }

        tracing::debug!(
            pages = pages.len(),
            sections_found = sections.len(),
            "section index built"
        );
        Self { sections }
    }

    pub fn span(&self, kind: SectionKind) -> Option<SectionSpan> {
        self.sections.get(&kind).copied()
    }

    pub fn contains(&self, kind: SectionKind) -> bool {
        self.sections.contains_key(&kind)
    }

    /// Number of sections located.
    pub fn found(&self) -> usize {
        self.sections.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, SectionSpan)> + '_ {
        self.sections.iter().map(|(k, s)| (*k, *s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(n: u32, text: &str) -> PageText {
        PageText::new(n, text)
    }

    #[test]
    fn single_match_yields_single_page_span() {
        let pages = vec![
            page(1, "cover"),
            page(7, "Balance Sheet as at March 31, 2024"),
            page(8, "assets and liabilities"),
        ];
        let index = SectionIndex::build(&pages);
        assert_eq!(
            index.span(SectionKind::BalanceSheet),
            Some(SectionSpan {
                start_page: 7,
                end_page: 7
            })
        );
    }

    #[test]
    fn non_contiguous_matches_extend_the_span() {
        let pages = vec![
            page(5, "Balance Sheet as at March 31, 2024"),
            page(20, "Notes to Accounts"),
            page(40, "Balance Sheet (continued)"),
        ];
        let index = SectionIndex::build(&pages);
        assert_eq!(
            index.span(SectionKind::BalanceSheet),
            Some(SectionSpan {
                start_page: 5,
                end_page: 40
            })
        );
    }

    #[test]
    fn unmatched_section_is_absent() {
        let pages = vec![page(1, "Statement of Profit and Loss")];
        let index = SectionIndex::build(&pages);
        assert!(index.contains(SectionKind::ProfitAndLoss));
        assert!(!index.contains(SectionKind::CashFlow));
        assert_eq!(index.span(SectionKind::CashFlow), None);
    }

    #[test]
    fn empty_document_has_empty_index() {
        let index = SectionIndex::build(&[]);
        assert_eq!(index.found(), 0);
        for kind in SectionKind::ALL {
            assert!(!index.contains(kind));
        }
    }

    #[test]
    fn sections_may_overlap_on_a_page() {
        let pages = vec![page(3, "Balance Sheet and Statement of Profit and Loss")];
        let index = SectionIndex::build(&pages);
        assert!(index.contains(SectionKind::BalanceSheet));
        assert!(index.contains(SectionKind::ProfitAndLoss));
    }

    #[test]
    fn alternate_phrasings_are_recognized() {
        let pages = vec![
            page(1, "STATEMENT OF FINANCIAL POSITION"),
            page(2, "Report of the Statutory Auditors"),
            page(3, "MD&A highlights"),
        ];
        let index = SectionIndex::build(&pages);
        assert!(index.contains(SectionKind::BalanceSheet));
        assert!(index.contains(SectionKind::AuditorReport));
        assert!(index.contains(SectionKind::ManagementDiscussion));
    }

    #[test]
    fn parse_accepts_catalogue_keys() {
        assert_eq!(
            SectionKind::parse("balance_sheet"),
            Some(SectionKind::BalanceSheet)
        );
        assert_eq!(
            SectionKind::parse("profit_loss"),
            Some(SectionKind::ProfitAndLoss)
        );
        assert_eq!(SectionKind::parse("notes"), Some(SectionKind::NotesToAccounts));
        assert_eq!(SectionKind::parse("appendix"), None);
    }
}
