//! Recommendation generator: actionable text for failing checks.
//!
//! Pure formatting over already-computed verdicts; no new judgment logic.

use std::collections::HashMap;

use shared_types::{CheckResult, CheckStatus};

use crate::catalog::{Priority, RuleCatalog};

/// One recommendation per NON_COMPLIANT or MISSING check, ordered by standard
/// priority (HIGH first), then by the catalogue's check order within a
/// standard.
///
/// MISSING checks name the absent section; NON_COMPLIANT checks ask the filer
/// to verify wording, since the surrounding topic was present.
pub fn generate(catalog: &RuleCatalog, results: &[CheckResult]) -> Vec<String> {
    let by_id: HashMap<&str, &CheckResult> = results
        .iter()
        .map(|result| (result.check_id.as_str(), result))
        .collect();

    let mut pending: Vec<(Priority, String)> = Vec::new();

    for standard in catalog.standards() {
        for check in &standard.checks {
            let Some(result) = by_id.get(check.id.as_str()) else {
                continue;
            };
            let text = match result.status {
                CheckStatus::Compliant => continue,
                CheckStatus::Missing => {
                    // Missing implies a section link; fall back to the
                    // requirement name if a caller hand-built the result.
                    let section = check
                        .section
                        .map(|kind| kind.name())
                        .unwrap_or(check.requirement.as_str());
                    format!(
                        "{}: required section '{}' was not found; add it and include '{}'",
                        standard.name, section, check.requirement
                    )
                }
                CheckStatus::NonCompliant => format!(
                    "{}: disclosure '{}' was not detected; verify its wording or content",
                    standard.name, check.requirement
                ),
            };
            pending.push((standard.priority, text));
        }
    }

    // Stable sort keeps catalogue order inside each priority tier.
    pending.sort_by_key(|(priority, _)| *priority);
    pending.into_iter().map(|(_, text)| text).collect()
}
