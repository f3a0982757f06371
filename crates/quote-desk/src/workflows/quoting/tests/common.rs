use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::catalog_import::CatalogImporter;
use crate::workflows::quoting::catalog::{CatalogDocument, CatalogSnapshot};
use crate::workflows::quoting::domain::{
    Answer, ClientProfile, Company, CompanyId, ConditionId, EligibilityRule, HealthCondition,
    Medication, MedicationId, Plan, PlanId, PlanType, PlanTypeId, Question, QuestionId,
    RuleAction, RuleId, RuleKind, State, StateId,
};
use crate::workflows::quoting::intake::QuoteRequest;
use crate::workflows::quoting::repository::{CatalogRepository, RepositoryError};
use crate::workflows::quoting::router::quote_router;
use crate::workflows::quoting::service::QuoteService;

pub(super) fn company(id: &str, name: &str) -> Company {
    Company {
        id: CompanyId::new(id),
        name: name.to_string(),
        active: true,
    }
}

pub(super) fn state(code: &str, name: &str) -> State {
    State {
        id: StateId::new(code),
        name: name.to_string(),
        code: code.to_string(),
    }
}

pub(super) fn condition(id: &str, name: &str) -> HealthCondition {
    HealthCondition {
        id: ConditionId::new(id),
        name: name.to_string(),
        description: format!("{name} diagnosis"),
        active: true,
        tags: BTreeSet::new(),
        alternatives: BTreeSet::new(),
    }
}

pub(super) fn medication(id: &str, name: &str) -> Medication {
    Medication {
        id: MedicationId::new(id),
        name: name.to_string(),
        description: format!("{name} prescription"),
        active: true,
        tags: BTreeSet::new(),
        alternatives: BTreeSet::new(),
    }
}

pub(super) fn question(id: &str, text: &str, company_id: &str) -> Question {
    Question {
        id: QuestionId::new(id),
        text: text.to_string(),
        company_id: CompanyId::new(company_id),
        active: true,
    }
}

pub(super) fn plan(id: &str, name: &str, company_id: &str, states: &[&str]) -> Plan {
    Plan {
        id: PlanId::new(id),
        name: name.to_string(),
        company_id: CompanyId::new(company_id),
        plan_type_id: PlanTypeId::new("gi"),
        active: true,
        state_ids: states.iter().map(|code| StateId::new(*code)).collect(),
    }
}

pub(super) fn rule(
    id: &str,
    plan_id: &str,
    kind: RuleKind,
    entity_id: &str,
    action: RuleAction,
) -> EligibilityRule {
    EligibilityRule {
        id: RuleId::new(id),
        plan_id: PlanId::new(plan_id),
        kind,
        entity_id: entity_id.to_string(),
        action,
        description: format!("{} {} {}", action.label(), kind.label(), entity_id),
        active: true,
    }
}

/// Small catalog shaped after the LifeGuard / Golden Shield reference data.
pub(super) fn document() -> CatalogDocument {
    CatalogDocument {
        companies: vec![company("lg", "LifeGuard Insurance"), company("gs", "Golden Shield")],
        states: vec![
            state("AL", "Alabama"),
            state("AK", "Alaska"),
            state("AZ", "Arizona"),
            state("AR", "Arkansas"),
            state("CA", "California"),
            state("FL", "Florida"),
            state("NY", "New York"),
        ],
        plan_types: vec![
            PlanType {
                id: PlanTypeId::new("gi"),
                name: "Guaranteed Issue".to_string(),
            },
            PlanType {
                id: PlanTypeId::new("imm"),
                name: "Immediate".to_string(),
            },
        ],
        conditions: vec![condition("stroke", "Stroke"), condition("mi", "Heart Attack")],
        medications: vec![medication("warfarin", "Warfarin")],
        questions: vec![
            question("q1", "Have you had a stroke in the past 2 years?", "lg"),
            question("q3", "more than 3 medications?", "gs"),
        ],
        plans: vec![
            plan("gi", "LifeGuard GI", "lg", &["AL", "AK", "AZ", "AR", "CA"]),
            plan("gs", "Golden Shield Immediate", "gs", &["CA", "FL"]),
        ],
        rules: vec![rule(
            "r1",
            "gi",
            RuleKind::Condition,
            "stroke",
            RuleAction::BlockIfYes,
        )],
    }
}

pub(super) fn snapshot(document: CatalogDocument) -> CatalogSnapshot {
    CatalogSnapshot::from_document(document).expect("fixture catalog indexes")
}

pub(super) fn catalog() -> CatalogSnapshot {
    snapshot(document())
}

pub(super) fn seed_catalog() -> CatalogSnapshot {
    CatalogImporter::seed().expect("seed catalog loads")
}

pub(super) fn profile(state: &str) -> ClientProfile {
    ClientProfile {
        first_name: "Dana".to_string(),
        last_name: "Reyes".to_string(),
        age: Some(64),
        state: StateId::new(state),
        ..ClientProfile::default()
    }
}

pub(super) fn profile_with_condition(state: &str, condition_id: &str) -> ClientProfile {
    let mut profile = profile(state);
    profile.conditions.insert(ConditionId::new(condition_id));
    profile
}

pub(super) fn profile_with_answer(state: &str, question_id: &str, answer: Answer) -> ClientProfile {
    let mut profile = profile(state);
    profile.answers.insert(QuestionId::new(question_id), answer);
    profile
}

pub(super) fn request(state: &str) -> QuoteRequest {
    QuoteRequest {
        first_name: "Dana".to_string(),
        last_name: "Reyes".to_string(),
        age: Some(64),
        state: state.to_string(),
        conditions: Vec::new(),
        medications: Vec::new(),
        answers: BTreeMap::new(),
    }
}

#[derive(Clone)]
pub(super) struct MemoryCatalog {
    snapshot: Arc<CatalogSnapshot>,
}

impl MemoryCatalog {
    pub(super) fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }
}

impl CatalogRepository for MemoryCatalog {
    fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, RepositoryError> {
        Ok(self.snapshot.clone())
    }
}

pub(super) struct UnavailableCatalog;

impl CatalogRepository for UnavailableCatalog {
    fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> QuoteService<MemoryCatalog> {
    QuoteService::new(Arc::new(MemoryCatalog::new(catalog())))
}

pub(super) fn seed_service() -> QuoteService<MemoryCatalog> {
    QuoteService::new(Arc::new(MemoryCatalog::new(seed_catalog())))
}

pub(super) fn quote_router_with_service(service: QuoteService<MemoryCatalog>) -> axum::Router {
    quote_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
