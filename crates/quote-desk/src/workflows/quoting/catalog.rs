use std::collections::HashMap;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::domain::{
    Company, CompanyId, ConditionId, EligibilityRule, HealthCondition, Medication, MedicationId,
    Plan, PlanId, PlanType, PlanTypeId, Question, QuestionId, State, StateId,
};

/// Read-only view of the reference data a quote is computed against.
///
/// Listing accessors return records in catalog (insertion) order; lookups return `None`
/// for dangling ids rather than failing.
pub trait ReferenceCatalog {
    fn companies(&self) -> &[Company];
    fn states(&self) -> &[State];
    fn plan_types(&self) -> &[PlanType];
    fn conditions(&self) -> &[HealthCondition];
    fn medications(&self) -> &[Medication];
    fn questions(&self) -> &[Question];
    fn plans(&self) -> &[Plan];
    fn rules(&self) -> &[EligibilityRule];

    fn company(&self, id: &CompanyId) -> Option<&Company>;
    fn state(&self, id: &StateId) -> Option<&State>;
    fn plan_type(&self, id: &PlanTypeId) -> Option<&PlanType>;
    fn health_condition(&self, id: &ConditionId) -> Option<&HealthCondition>;
    fn medication(&self, id: &MedicationId) -> Option<&Medication>;
    fn question(&self, id: &QuestionId) -> Option<&Question>;
    fn plan(&self, id: &PlanId) -> Option<&Plan>;

    /// Every rule attached to the plan, active or not, in catalog order.
    fn rules_for_plan(&self, plan_id: &PlanId) -> Vec<&EligibilityRule>;

    fn active_rules_for_plan(&self, plan_id: &PlanId) -> Vec<&EligibilityRule> {
        self.rules_for_plan(plan_id)
            .into_iter()
            .filter(|rule| rule.active)
            .collect()
    }

    fn active_plans(&self) -> Vec<&Plan> {
        self.plans().iter().filter(|plan| plan.active).collect()
    }

    /// States the plan is offered in that exist in the catalog; unknown state ids are dropped.
    fn plan_states(&self, plan_id: &PlanId) -> Vec<&State> {
        self.plan(plan_id)
            .map(|plan| {
                plan.state_ids
                    .iter()
                    .filter_map(|state_id| self.state(state_id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Looks a submitted state up by exact id, then by id or postal code ignoring case.
    fn find_state(&self, submitted: &str) -> Option<&State> {
        let submitted = submitted.trim();
        self.state(&StateId::new(submitted)).or_else(|| {
            self.states().iter().find(|state| {
                state.id.as_str().eq_ignore_ascii_case(submitted)
                    || state.code.eq_ignore_ascii_case(submitted)
            })
        })
    }

    /// Active questions owned by the company, used to group the underwriting step.
    fn questions_for_company(&self, company_id: &CompanyId) -> Vec<&Question> {
        self.questions()
            .iter()
            .filter(|question| question.active && &question.company_id == company_id)
            .collect()
    }

    fn search_conditions(&self, term: &str) -> Vec<&HealthCondition> {
        let needle = term.trim().to_lowercase();
        self.conditions()
            .iter()
            .filter(|condition| condition.active)
            .filter(|condition| matches_term(&condition.name, &condition.description, &needle))
            .collect()
    }

    fn search_medications(&self, term: &str) -> Vec<&Medication> {
        let needle = term.trim().to_lowercase();
        self.medications()
            .iter()
            .filter(|medication| medication.active)
            .filter(|medication| {
                matches_term(&medication.name, &medication.description, &needle)
            })
            .collect()
    }
}

fn matches_term(name: &str, description: &str, needle: &str) -> bool {
    needle.is_empty()
        || name.to_lowercase().contains(needle)
        || description.to_lowercase().contains(needle)
}

/// Serialized shape of a full catalog, as exported by the admin subsystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub plan_types: Vec<PlanType>,
    #[serde(default)]
    pub conditions: Vec<HealthCondition>,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub plans: Vec<Plan>,
    #[serde(default)]
    pub rules: Vec<EligibilityRule>,
}

impl CatalogDocument {
    /// Replace the document's rules, e.g. with rows from a rule sheet.
    pub fn with_rules(mut self, rules: Vec<EligibilityRule>) -> Self {
        self.rules = rules;
        self
    }
}

/// Structural problems that prevent a snapshot from being indexed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate {kind} id '{id}' in catalog")]
    DuplicateId { kind: &'static str, id: String },
}

/// Frozen, indexed catalog. Cheap to share behind an `Arc` across concurrent quotes.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    document: CatalogDocument,
    companies: HashMap<CompanyId, usize>,
    states: HashMap<StateId, usize>,
    plan_types: HashMap<PlanTypeId, usize>,
    conditions: HashMap<ConditionId, usize>,
    medications: HashMap<MedicationId, usize>,
    questions: HashMap<QuestionId, usize>,
    plans: HashMap<PlanId, usize>,
    rules_by_plan: HashMap<PlanId, Vec<usize>>,
}

impl CatalogSnapshot {
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let companies = index_by("company", &document.companies, |c| &c.id)?;
        let states = index_by("state", &document.states, |s| &s.id)?;
        let plan_types = index_by("plan type", &document.plan_types, |t| &t.id)?;
        let conditions = index_by("health condition", &document.conditions, |c| &c.id)?;
        let medications = index_by("medication", &document.medications, |m| &m.id)?;
        let questions = index_by("question", &document.questions, |q| &q.id)?;
        let plans = index_by("plan", &document.plans, |p| &p.id)?;
        index_by("rule", &document.rules, |r| &r.id)?;

        let mut rules_by_plan: HashMap<PlanId, Vec<usize>> = HashMap::new();
        for (position, rule) in document.rules.iter().enumerate() {
            rules_by_plan
                .entry(rule.plan_id.clone())
                .or_default()
                .push(position);
        }

        Ok(Self {
            document,
            companies,
            states,
            plan_types,
            conditions,
            medications,
            questions,
            plans,
            rules_by_plan,
        })
    }

    pub fn document(&self) -> &CatalogDocument {
        &self.document
    }
}

fn index_by<T, K, F>(
    kind: &'static str,
    items: &[T],
    key: F,
) -> Result<HashMap<K, usize>, CatalogError>
where
    K: Eq + Hash + Clone + std::fmt::Display,
    F: Fn(&T) -> &K,
{
    let mut index = HashMap::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let id = key(item);
        if index.insert(id.clone(), position).is_some() {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(index)
}

fn lookup<'a, K, T>(index: &HashMap<K, usize>, items: &'a [T], id: &K) -> Option<&'a T>
where
    K: Eq + Hash,
{
    index.get(id).and_then(|position| items.get(*position))
}

impl ReferenceCatalog for CatalogSnapshot {
    fn companies(&self) -> &[Company] {
        &self.document.companies
    }

    fn states(&self) -> &[State] {
        &self.document.states
    }

    fn plan_types(&self) -> &[PlanType] {
        &self.document.plan_types
    }

    fn conditions(&self) -> &[HealthCondition] {
        &self.document.conditions
    }

    fn medications(&self) -> &[Medication] {
        &self.document.medications
    }

    fn questions(&self) -> &[Question] {
        &self.document.questions
    }

    fn plans(&self) -> &[Plan] {
        &self.document.plans
    }

    fn rules(&self) -> &[EligibilityRule] {
        &self.document.rules
    }

    fn company(&self, id: &CompanyId) -> Option<&Company> {
        lookup(&self.companies, &self.document.companies, id)
    }

    fn state(&self, id: &StateId) -> Option<&State> {
        lookup(&self.states, &self.document.states, id)
    }

    fn plan_type(&self, id: &PlanTypeId) -> Option<&PlanType> {
        lookup(&self.plan_types, &self.document.plan_types, id)
    }

    fn health_condition(&self, id: &ConditionId) -> Option<&HealthCondition> {
        lookup(&self.conditions, &self.document.conditions, id)
    }

    fn medication(&self, id: &MedicationId) -> Option<&Medication> {
        lookup(&self.medications, &self.document.medications, id)
    }

    fn question(&self, id: &QuestionId) -> Option<&Question> {
        lookup(&self.questions, &self.document.questions, id)
    }

    fn plan(&self, id: &PlanId) -> Option<&Plan> {
        lookup(&self.plans, &self.document.plans, id)
    }

    fn rules_for_plan(&self, plan_id: &PlanId) -> Vec<&EligibilityRule> {
        self.rules_by_plan
            .get(plan_id)
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(|position| self.document.rules.get(*position))
                    .collect()
            })
            .unwrap_or_default()
    }
}
