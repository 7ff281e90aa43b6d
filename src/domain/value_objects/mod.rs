pub mod quota;
pub mod scrape_rules;

pub use quota::QuotaDecision;
pub use scrape_rules::ScrapeRules;
