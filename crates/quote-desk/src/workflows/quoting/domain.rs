use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

catalog_id!(
    /// Identifier wrapper for insurance carriers.
    CompanyId
);
catalog_id!(
    /// Identifier for a state; by convention the two-letter postal code.
    StateId
);
catalog_id!(PlanTypeId);
catalog_id!(ConditionId);
catalog_id!(MedicationId);
catalog_id!(QuestionId);
catalog_id!(PlanId);
catalog_id!(RuleId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanType {
    pub id: PlanTypeId,
    pub name: String,
}

/// Diagnosis a client may disclose during the health step of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCondition {
    pub id: ConditionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "active_by_default")]
    pub active: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub alternatives: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub id: MedicationId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "active_by_default")]
    pub active: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub alternatives: BTreeSet<String>,
}

/// Underwriting question owned by a single carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub company_id: CompanyId,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

/// Insurance product offered by a carrier in a set of states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: String,
    pub company_id: CompanyId,
    pub plan_type_id: PlanTypeId,
    #[serde(default = "active_by_default")]
    pub active: bool,
    #[serde(default)]
    pub state_ids: BTreeSet<StateId>,
}

impl Plan {
    pub fn offered_in(&self, state: &StateId) -> bool {
        self.state_ids.contains(state)
    }
}

/// Which catalog entity a rule's `entity_id` points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Condition,
    Medication,
    Question,
    /// Any value the catalog stores that this build does not understand.
    #[serde(other)]
    Unknown,
}

impl RuleKind {
    pub const fn label(self) -> &'static str {
        match self {
            RuleKind::Condition => "condition",
            RuleKind::Medication => "medication",
            RuleKind::Question => "question",
            RuleKind::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    BlockIfYes,
    BlockIfNo,
    #[serde(other)]
    Unknown,
}

impl RuleAction {
    pub const fn label(self) -> &'static str {
        match self {
            RuleAction::BlockIfYes => "block_if_yes",
            RuleAction::BlockIfNo => "block_if_no",
            RuleAction::Unknown => "unknown",
        }
    }
}

/// Per-plan predicate that can block a client from the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityRule {
    pub id: RuleId,
    pub plan_id: PlanId,
    #[serde(rename = "rule_type")]
    pub kind: RuleKind,
    pub entity_id: String,
    #[serde(rename = "rule_action")]
    pub action: RuleAction,
    #[serde(default)]
    pub description: String,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

/// Three-valued answer to an underwriting question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    #[default]
    Unanswered,
}

impl From<Option<bool>> for Answer {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Answer::Yes,
            Some(false) => Answer::No,
            None => Answer::Unanswered,
        }
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Answer::from(Some(value))
    }
}

/// Immutable client snapshot used for a single quote.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientProfile {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<u8>,
    pub state: StateId,
    pub conditions: BTreeSet<ConditionId>,
    pub medications: BTreeSet<MedicationId>,
    pub answers: BTreeMap<QuestionId, Answer>,
}

impl ClientProfile {
    pub fn has_condition(&self, id: &ConditionId) -> bool {
        self.conditions.contains(id)
    }

    pub fn takes_medication(&self, id: &MedicationId) -> bool {
        self.medications.contains(id)
    }

    /// Missing keys read as [`Answer::Unanswered`].
    pub fn answer(&self, id: &QuestionId) -> Answer {
        self.answers.get(id).copied().unwrap_or_default()
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

fn active_by_default() -> bool {
    true
}
