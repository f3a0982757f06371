//! Advisory checks for dangling references in a catalog.
//!
//! The eligibility engine fails open on every issue reported here; the audit exists so the
//! admin side can see what quotes are silently skipping.

use serde::Serialize;

use super::catalog::ReferenceCatalog;
use super::domain::{ConditionId, MedicationId, PlanId, QuestionId, RuleAction, RuleId, RuleKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum IntegrityIssue {
    /// Rule target id does not exist for the declared kind.
    DanglingRuleTarget {
        rule_id: RuleId,
        kind: &'static str,
        entity_id: String,
    },
    /// Rule target exists but is inactive, so the rule is inert.
    InactiveRuleTarget {
        rule_id: RuleId,
        kind: &'static str,
        entity_id: String,
    },
    UnknownRuleKind { rule_id: RuleId },
    UnknownRuleAction { rule_id: RuleId },
    RuleForMissingPlan { rule_id: RuleId, plan_id: PlanId },
    UnknownCompany { plan_id: PlanId, company_id: String },
    UnknownPlanType { plan_id: PlanId, plan_type_id: String },
    UnknownState { plan_id: PlanId, state_id: String },
    PlanOfferedNowhere { plan_id: PlanId },
    QuestionForUnknownCompany { question_id: QuestionId, company_id: String },
}

impl IntegrityIssue {
    pub fn summary(&self) -> String {
        match self {
            IntegrityIssue::DanglingRuleTarget {
                rule_id,
                kind,
                entity_id,
            } => format!("rule {rule_id} targets missing {kind} '{entity_id}'"),
            IntegrityIssue::InactiveRuleTarget {
                rule_id,
                kind,
                entity_id,
            } => format!("rule {rule_id} targets inactive {kind} '{entity_id}'"),
            IntegrityIssue::UnknownRuleKind { rule_id } => {
                format!("rule {rule_id} has an unrecognized rule type")
            }
            IntegrityIssue::UnknownRuleAction { rule_id } => {
                format!("rule {rule_id} has an unrecognized rule action")
            }
            IntegrityIssue::RuleForMissingPlan { rule_id, plan_id } => {
                format!("rule {rule_id} is attached to missing plan '{plan_id}'")
            }
            IntegrityIssue::UnknownCompany {
                plan_id,
                company_id,
            } => format!("plan {plan_id} references missing company '{company_id}'"),
            IntegrityIssue::UnknownPlanType {
                plan_id,
                plan_type_id,
            } => format!("plan {plan_id} references missing plan type '{plan_type_id}'"),
            IntegrityIssue::UnknownState { plan_id, state_id } => {
                format!("plan {plan_id} is offered in unknown state '{state_id}'")
            }
            IntegrityIssue::PlanOfferedNowhere { plan_id } => {
                format!("plan {plan_id} is not offered in any state")
            }
            IntegrityIssue::QuestionForUnknownCompany {
                question_id,
                company_id,
            } => format!("question {question_id} belongs to missing company '{company_id}'"),
        }
    }
}

enum TargetState {
    Missing,
    Inactive,
    Usable,
}

impl TargetState {
    fn from_lookup(active: Option<bool>) -> Self {
        match active {
            None => TargetState::Missing,
            Some(false) => TargetState::Inactive,
            Some(true) => TargetState::Usable,
        }
    }
}

/// Walk plans, rules and questions and report every reference the engine would skip.
pub fn audit_catalog<C>(catalog: &C) -> Vec<IntegrityIssue>
where
    C: ReferenceCatalog + ?Sized,
{
    let mut issues = Vec::new();

    for plan in catalog.plans() {
        if catalog.company(&plan.company_id).is_none() {
            issues.push(IntegrityIssue::UnknownCompany {
                plan_id: plan.id.clone(),
                company_id: plan.company_id.to_string(),
            });
        }
        if catalog.plan_type(&plan.plan_type_id).is_none() {
            issues.push(IntegrityIssue::UnknownPlanType {
                plan_id: plan.id.clone(),
                plan_type_id: plan.plan_type_id.to_string(),
            });
        }
        if plan.state_ids.is_empty() {
            issues.push(IntegrityIssue::PlanOfferedNowhere {
                plan_id: plan.id.clone(),
            });
        }
        for state_id in &plan.state_ids {
            if catalog.state(state_id).is_none() {
                issues.push(IntegrityIssue::UnknownState {
                    plan_id: plan.id.clone(),
                    state_id: state_id.to_string(),
                });
            }
        }
    }

    for rule in catalog.rules() {
        if catalog.plan(&rule.plan_id).is_none() {
            issues.push(IntegrityIssue::RuleForMissingPlan {
                rule_id: rule.id.clone(),
                plan_id: rule.plan_id.clone(),
            });
        }

        if rule.action == RuleAction::Unknown {
            issues.push(IntegrityIssue::UnknownRuleAction {
                rule_id: rule.id.clone(),
            });
        }

        let target = match rule.kind {
            RuleKind::Condition => TargetState::from_lookup(
                catalog
                    .health_condition(&ConditionId(rule.entity_id.clone()))
                    .map(|condition| condition.active),
            ),
            RuleKind::Medication => TargetState::from_lookup(
                catalog
                    .medication(&MedicationId(rule.entity_id.clone()))
                    .map(|medication| medication.active),
            ),
            RuleKind::Question => TargetState::from_lookup(
                catalog
                    .question(&QuestionId(rule.entity_id.clone()))
                    .map(|question| question.active),
            ),
            RuleKind::Unknown => {
                issues.push(IntegrityIssue::UnknownRuleKind {
                    rule_id: rule.id.clone(),
                });
                continue;
            }
        };

        match target {
            TargetState::Missing => issues.push(IntegrityIssue::DanglingRuleTarget {
                rule_id: rule.id.clone(),
                kind: rule.kind.label(),
                entity_id: rule.entity_id.clone(),
            }),
            TargetState::Inactive => issues.push(IntegrityIssue::InactiveRuleTarget {
                rule_id: rule.id.clone(),
                kind: rule.kind.label(),
                entity_id: rule.entity_id.clone(),
            }),
            TargetState::Usable => {}
        }
    }

    for question in catalog.questions() {
        if catalog.company(&question.company_id).is_none() {
            issues.push(IntegrityIssue::QuestionForUnknownCompany {
                question_id: question.id.clone(),
                company_id: question.company_id.to_string(),
            });
        }
    }

    issues
}
