use serde::{Deserialize, Serialize};

use super::super::catalog::ReferenceCatalog;
use super::super::domain::{ClientProfile, Plan, PlanId, RuleId};
use super::rules::{evaluate, BlockReason, Verdict};

pub const ELIGIBLE_REASON: &str = "Eligible for this plan";
pub const STATE_UNAVAILABLE_REASON: &str = "Plan not available in client's state";

/// Decision reached for a single plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanDecision {
    Eligible,
    Ineligible(IneligibilityReason),
}

/// Enumerates why a plan was withheld, so audits can trace the blocking rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IneligibilityReason {
    StateUnavailable,
    Rule { rule_id: RuleId, reason: BlockReason },
}

impl IneligibilityReason {
    pub fn summary(&self) -> String {
        match self {
            IneligibilityReason::StateUnavailable => STATE_UNAVAILABLE_REASON.to_string(),
            IneligibilityReason::Rule { reason, .. } => reason.summary(),
        }
    }
}

impl PlanDecision {
    pub fn summary(&self) -> String {
        match self {
            PlanDecision::Eligible => ELIGIBLE_REASON.to_string(),
            PlanDecision::Ineligible(reason) => reason.summary(),
        }
    }
}

/// Resolver output: the `{eligible, reason}` pair plus the structured decision behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub plan_id: PlanId,
    pub eligible: bool,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_rule: Option<RuleId>,
}

impl EligibilityOutcome {
    fn from_decision(plan_id: PlanId, decision: PlanDecision) -> Self {
        let reason = decision.summary();
        let (eligible, blocking_rule) = match decision {
            PlanDecision::Eligible => (true, None),
            PlanDecision::Ineligible(IneligibilityReason::Rule { rule_id, .. }) => {
                (false, Some(rule_id))
            }
            PlanDecision::Ineligible(IneligibilityReason::StateUnavailable) => (false, None),
        };

        Self {
            plan_id,
            eligible,
            reason,
            blocking_rule,
        }
    }
}

/// Resolve one plan: state gate first, then active rules in catalog order, first block wins.
///
/// Whether the plan itself is active is the caller's concern.
pub fn resolve<C>(plan: &Plan, profile: &ClientProfile, catalog: &C) -> EligibilityOutcome
where
    C: ReferenceCatalog + ?Sized,
{
    EligibilityOutcome::from_decision(plan.id.clone(), decide(plan, profile, catalog))
}

pub fn decide<C>(plan: &Plan, profile: &ClientProfile, catalog: &C) -> PlanDecision
where
    C: ReferenceCatalog + ?Sized,
{
    if !plan.offered_in(&profile.state) {
        return PlanDecision::Ineligible(IneligibilityReason::StateUnavailable);
    }

    for rule in catalog.active_rules_for_plan(&plan.id) {
        if let Verdict::Block(reason) = evaluate(rule, profile, catalog) {
            return PlanDecision::Ineligible(IneligibilityReason::Rule {
                rule_id: rule.id.clone(),
                reason,
            });
        }
    }

    PlanDecision::Eligible
}
