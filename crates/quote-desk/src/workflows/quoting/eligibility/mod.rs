mod aggregate;
mod resolver;
mod rules;

pub use aggregate::{
    get_eligible_plans, CompanyGroup, PlanResult, QuoteResult, UNKNOWN_COMPANY,
    UNKNOWN_PLAN_TYPE,
};
pub use resolver::{
    decide, resolve, EligibilityOutcome, IneligibilityReason, PlanDecision, ELIGIBLE_REASON,
    STATE_UNAVAILABLE_REASON,
};
pub use rules::{evaluate, BlockReason, Verdict};

pub(crate) use aggregate::plan_result;
