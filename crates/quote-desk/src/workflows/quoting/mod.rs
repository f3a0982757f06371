//! Agent-facing plan quoting: catalog access, client intake, and the eligibility engine.
//!
//! The engine in [`eligibility`] is a pure function of a [`ClientProfile`] and a
//! [`ReferenceCatalog`] snapshot; [`QuoteService`] is the I/O boundary that fetches the
//! snapshot from a [`CatalogRepository`] before evaluating.

pub mod catalog;
pub mod domain;
pub mod eligibility;
pub mod intake;
pub mod integrity;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogDocument, CatalogError, CatalogSnapshot, ReferenceCatalog};
pub use domain::{
    Answer, ClientProfile, Company, CompanyId, ConditionId, EligibilityRule, HealthCondition,
    Medication, MedicationId, Plan, PlanId, PlanType, PlanTypeId, Question, QuestionId, RuleAction,
    RuleId, RuleKind, State, StateId,
};
pub use eligibility::{
    evaluate, get_eligible_plans, resolve, BlockReason, CompanyGroup, EligibilityOutcome,
    IneligibilityReason, PlanDecision, PlanResult, QuoteResult, Verdict,
};
pub use intake::{ProfileIntake, QuoteRequest};
pub use integrity::{audit_catalog, IntegrityIssue};
pub use repository::{CatalogRepository, RepositoryError};
pub use router::quote_router;
pub use service::{
    ClientSummary, CompanyQuestions, PlanCheck, QuoteReport, QuoteService, QuoteServiceError,
};
