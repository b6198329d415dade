pub mod types;

pub use types::{
    CheckResult, CheckStatus, ComplianceReport, ExtractionMethod, ExtractionStats,
    FinancialDocument, KeywordMatch, PageText, Rating,
};
