//! Compliance evaluator: combines per-check evidence into verdicts and an
//! aggregate scored report.
//!
//! The per-check decision table:
//!
//! 1. at least one keyword match        -> COMPLIANT
//! 2. no match, mandatory check, and its linked section is entirely absent
//!    from the section index            -> MISSING
//! 3. otherwise                         -> NON_COMPLIANT
//!
//! MISSING signals a structural gap (the filer omitted a whole required
//! section); NON_COMPLIANT means the topic exists but the specific wording
//! was not found. The two call for different remediation.

use shared_types::{CheckResult, CheckStatus, ComplianceReport, FinancialDocument, Rating};

use crate::catalog::RuleCatalog;
use crate::evidence;
use crate::recommend;
use crate::sections::SectionIndex;

/// Evaluate a document, building the section index internally.
pub fn evaluate(catalog: &RuleCatalog, document: &FinancialDocument) -> ComplianceReport {
    let sections = SectionIndex::build(&document.pages);
    evaluate_with_sections(catalog, document, &sections)
}

/// Evaluate against a pre-built section index.
///
/// Never fails for well-formed input: an empty document is a legitimate
/// (if extreme) input whose correct answer is "nothing found", score 0.
pub fn evaluate_with_sections(
    catalog: &RuleCatalog,
    document: &FinancialDocument,
    sections: &SectionIndex,
) -> ComplianceReport {
    let mut results = Vec::with_capacity(catalog.total_checks());
    let (mut compliant, mut non_compliant, mut missing) = (0u32, 0u32, 0u32);
    let mut total_weight = 0.0;
    let mut achieved_weight = 0.0;

    for standard in catalog.standards() {
        for check in &standard.checks {
            let matches = evidence::find_matches(&document.pages, check);

            let status = if !matches.is_empty() {
                CheckStatus::Compliant
            } else if check.mandatory
                && check.section.is_some_and(|kind| !sections.contains(kind))
            {
                CheckStatus::Missing
            } else {
                CheckStatus::NonCompliant
            };

            total_weight += check.weight;
            match status {
                CheckStatus::Compliant => {
                    compliant += 1;
                    achieved_weight += check.weight;
                }
                CheckStatus::NonCompliant => non_compliant += 1,
                CheckStatus::Missing => missing += 1,
            }

            results.push(CheckResult {
                check_id: check.id.clone(),
                standard_id: standard.id.clone(),
                requirement: check.requirement.clone(),
                status,
                mandatory: check.mandatory,
                weight: check.weight,
                matches,
            });
        }
    }

    let score = if total_weight > 0.0 {
        round2(100.0 * achieved_weight / total_weight)
    } else {
        0.0
    };
    let rating = Rating::from_score(score);
    let recommendations = recommend::generate(catalog, &results);

    tracing::debug!(
        document = %document.id,
        total = results.len(),
        compliant,
        non_compliant,
        missing,
        score,
        "compliance evaluation complete"
    );

    ComplianceReport {
        document_id: document.id.clone(),
        total_checks: results.len() as u32,
        compliant,
        non_compliant,
        missing,
        total_weight,
        achieved_weight,
        score,
        rating,
        results,
        recommendations,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
