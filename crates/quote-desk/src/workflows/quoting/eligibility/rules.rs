use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::catalog::ReferenceCatalog;
use super::super::domain::{
    Answer, ClientProfile, ConditionId, EligibilityRule, MedicationId, QuestionId, RuleAction,
    RuleKind,
};

/// Outcome of evaluating one rule against one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Block(BlockReason),
}

impl Verdict {
    pub fn is_block(&self) -> bool {
        matches!(self, Verdict::Block(_))
    }

    pub fn reason(&self) -> Option<String> {
        match self {
            Verdict::Pass => None,
            Verdict::Block(reason) => Some(reason.summary()),
        }
    }
}

/// Why a rule blocked, carrying the display name captured at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    HasCondition { name: String },
    MissingCondition { name: String },
    TakesMedication { name: String },
    MissingMedication { name: String },
    Answered { question: String },
}

impl BlockReason {
    pub fn summary(&self) -> String {
        match self {
            BlockReason::HasCondition { name } => {
                format!("Ineligible due to health condition: {name}")
            }
            BlockReason::MissingCondition { name } => {
                format!("Ineligible due to absence of health condition: {name}")
            }
            BlockReason::TakesMedication { name } => {
                format!("Ineligible due to medication: {name}")
            }
            BlockReason::MissingMedication { name } => {
                format!("Ineligible due to absence of medication: {name}")
            }
            BlockReason::Answered { question } => {
                format!("Ineligible due to answer to: \"{question}\"")
            }
        }
    }
}

/// Evaluate a single rule. Never fails: inactive rules, unknown kinds or actions, and rules
/// whose target is missing or inactive all pass.
pub fn evaluate<C>(rule: &EligibilityRule, profile: &ClientProfile, catalog: &C) -> Verdict
where
    C: ReferenceCatalog + ?Sized,
{
    if !rule.active || rule.action == RuleAction::Unknown {
        return Verdict::Pass;
    }

    match rule.kind {
        RuleKind::Condition => evaluate_condition(rule, profile, catalog),
        RuleKind::Medication => evaluate_medication(rule, profile, catalog),
        RuleKind::Question => evaluate_question(rule, profile, catalog),
        RuleKind::Unknown => Verdict::Pass,
    }
}

fn evaluate_condition<C>(rule: &EligibilityRule, profile: &ClientProfile, catalog: &C) -> Verdict
where
    C: ReferenceCatalog + ?Sized,
{
    let id = ConditionId(rule.entity_id.clone());
    let Some(condition) = catalog.health_condition(&id).filter(|c| c.active) else {
        skip_inert(rule);
        return Verdict::Pass;
    };

    let present = profile.has_condition(&id);
    match (rule.action, present) {
        (RuleAction::BlockIfYes, true) => Verdict::Block(BlockReason::HasCondition {
            name: condition.name.clone(),
        }),
        (RuleAction::BlockIfNo, false) => Verdict::Block(BlockReason::MissingCondition {
            name: condition.name.clone(),
        }),
        _ => Verdict::Pass,
    }
}

fn evaluate_medication<C>(rule: &EligibilityRule, profile: &ClientProfile, catalog: &C) -> Verdict
where
    C: ReferenceCatalog + ?Sized,
{
    let id = MedicationId(rule.entity_id.clone());
    let Some(medication) = catalog.medication(&id).filter(|m| m.active) else {
        skip_inert(rule);
        return Verdict::Pass;
    };

    let present = profile.takes_medication(&id);
    match (rule.action, present) {
        (RuleAction::BlockIfYes, true) => Verdict::Block(BlockReason::TakesMedication {
            name: medication.name.clone(),
        }),
        (RuleAction::BlockIfNo, false) => Verdict::Block(BlockReason::MissingMedication {
            name: medication.name.clone(),
        }),
        _ => Verdict::Pass,
    }
}

fn evaluate_question<C>(rule: &EligibilityRule, profile: &ClientProfile, catalog: &C) -> Verdict
where
    C: ReferenceCatalog + ?Sized,
{
    let id = QuestionId(rule.entity_id.clone());
    let Some(question) = catalog.question(&id).filter(|q| q.active) else {
        skip_inert(rule);
        return Verdict::Pass;
    };

    let blocks = matches!(
        (rule.action, profile.answer(&id)),
        (RuleAction::BlockIfYes, Answer::Yes) | (RuleAction::BlockIfNo, Answer::No)
    );

    if blocks {
        Verdict::Block(BlockReason::Answered {
            question: question.text.clone(),
        })
    } else {
        Verdict::Pass
    }
}

fn skip_inert(rule: &EligibilityRule) {
    debug!(
        rule_id = %rule.id,
        plan_id = %rule.plan_id,
        kind = rule.kind.label(),
        entity_id = %rule.entity_id,
        "skipping rule with missing or inactive target"
    );
}
