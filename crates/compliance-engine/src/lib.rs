//! Compliance evaluation core for financial annual reports.
//!
//! Takes extracted document text (segmented into pages) and a rule catalogue,
//! and produces one verdict per check with supporting evidence plus an
//! aggregate weighted score. Text extraction, table export and report
//! rendering are external collaborators; this crate only consumes and
//! produces plain data structures.

pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod evidence;
pub mod recommend;
pub mod sections;

pub use catalog::{Check, Priority, RuleCatalog, Standard};
pub use error::CatalogError;
pub use sections::{SectionIndex, SectionKind, SectionSpan};

use shared_types::{ComplianceReport, FinancialDocument};

/// Evaluation entry point. Holds the immutable rule catalogue for a run;
/// separate engines with different catalogues can evaluate concurrently.
pub struct ComplianceEngine {
    catalog: RuleCatalog,
}

impl ComplianceEngine {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Run every check in the catalogue against the document.
    pub fn evaluate(&self, document: &FinancialDocument) -> ComplianceReport {
        evaluator::evaluate(&self.catalog, document)
    }

    /// Evaluate against a section index the caller already built, so the
    /// index can be reused for rendering without a second scan.
    pub fn evaluate_with_sections(
        &self,
        document: &FinancialDocument,
        sections: &SectionIndex,
    ) -> ComplianceReport {
        evaluator::evaluate_with_sections(&self.catalog, document, sections)
    }

    /// Evaluate raw text without a page map (single synthetic page).
    pub fn evaluate_text(&self, id: &str, text: &str) -> ComplianceReport {
        self.evaluate(&FinancialDocument::from_text(id, text))
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new(RuleCatalog::builtin())
    }
}
