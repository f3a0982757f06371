use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::catalog::ReferenceCatalog;
use super::domain::{
    ClientProfile, CompanyId, HealthCondition, Medication, PlanId, Question, RuleId, State,
};
use super::eligibility::{
    get_eligible_plans, plan_result, resolve, CompanyGroup, PlanResult, QuoteResult,
    UNKNOWN_COMPANY,
};
use super::integrity::{audit_catalog, IntegrityIssue};
use super::intake::{ProfileIntake, QuoteRequest};
use super::repository::{CatalogRepository, RepositoryError};

/// Full quote returned to the agent.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteReport {
    pub client: ClientSummary,
    pub generated_at: DateTime<Utc>,
    pub eligible_plans: Vec<PlanResult>,
    pub ineligible_plans: Vec<PlanResult>,
    pub eligible_by_company: Vec<CompanyGroup>,
}

impl QuoteReport {
    fn new(profile: &ClientProfile, result: QuoteResult, generated_at: DateTime<Utc>) -> Self {
        let eligible_by_company = result.grouped_by_company();
        Self {
            client: ClientSummary::from(profile),
            generated_at,
            eligible_plans: result.eligible_plans,
            ineligible_plans: result.ineligible_plans,
            eligible_by_company,
        }
    }
}

/// Display-only echo of the profile a quote was computed for.
#[derive(Debug, Clone, Serialize)]
pub struct ClientSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    pub state: String,
}

impl From<&ClientProfile> for ClientSummary {
    fn from(profile: &ClientProfile) -> Self {
        Self {
            name: profile.display_name(),
            age: profile.age,
            state: profile.state.to_string(),
        }
    }
}

/// Single-plan re-validation result.
#[derive(Debug, Clone, Serialize)]
pub struct PlanCheck {
    pub eligible: bool,
    pub plan: PlanResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocking_rule: Option<RuleId>,
    pub generated_at: DateTime<Utc>,
}

/// Active questions of one carrier, for the underwriting step of the quote form.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyQuestions {
    pub company_id: CompanyId,
    pub company: String,
    pub questions: Vec<Question>,
}

/// Service composing the catalog repository, profile intake and eligibility engine.
pub struct QuoteService<C> {
    repository: Arc<C>,
    intake: ProfileIntake,
}

impl<C> QuoteService<C>
where
    C: CatalogRepository + 'static,
{
    pub fn new(repository: Arc<C>) -> Self {
        Self {
            repository,
            intake: ProfileIntake,
        }
    }

    /// Compute the full quote for a client against the current catalog snapshot.
    pub fn quote(&self, request: QuoteRequest) -> Result<QuoteReport, QuoteServiceError> {
        let catalog = self.repository.snapshot()?;
        let profile = self.intake.profile_from_request(request, &*catalog);
        let result = get_eligible_plans(&profile, &*catalog);

        info!(
            state = %profile.state,
            eligible = result.eligible_plans.len(),
            ineligible = result.ineligible_plans.len(),
            "quote generated"
        );

        Ok(QuoteReport::new(&profile, result, Utc::now()))
    }

    /// Re-validate one plan. Inactive plans are never quoted, so they are refused here too.
    pub fn check_plan(
        &self,
        plan_id: &PlanId,
        request: QuoteRequest,
    ) -> Result<PlanCheck, QuoteServiceError> {
        let catalog = self.repository.snapshot()?;
        let plan = catalog
            .plan(plan_id)
            .ok_or_else(|| QuoteServiceError::PlanNotFound(plan_id.clone()))?;
        if !plan.active {
            return Err(QuoteServiceError::PlanInactive(plan_id.clone()));
        }

        let profile = self.intake.profile_from_request(request, &*catalog);
        let outcome = resolve(plan, &profile, &*catalog);

        info!(
            plan_id = %plan.id,
            state = %profile.state,
            eligible = outcome.eligible,
            "plan eligibility checked"
        );

        Ok(PlanCheck {
            eligible: outcome.eligible,
            plan: plan_result(plan, outcome.reason, &*catalog),
            blocking_rule: outcome.blocking_rule,
            generated_at: Utc::now(),
        })
    }

    pub fn states(&self) -> Result<Vec<State>, QuoteServiceError> {
        let catalog = self.repository.snapshot()?;
        Ok(catalog.states().to_vec())
    }

    pub fn conditions(&self, search: &str) -> Result<Vec<HealthCondition>, QuoteServiceError> {
        let catalog = self.repository.snapshot()?;
        Ok(catalog.search_conditions(search).into_iter().cloned().collect())
    }

    pub fn medications(&self, search: &str) -> Result<Vec<Medication>, QuoteServiceError> {
        let catalog = self.repository.snapshot()?;
        Ok(catalog
            .search_medications(search)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Active questions grouped by owning company, optionally narrowed to one company.
    pub fn questions(
        &self,
        company_id: Option<&CompanyId>,
    ) -> Result<Vec<CompanyQuestions>, QuoteServiceError> {
        let catalog = self.repository.snapshot()?;

        let mut company_ids: Vec<&CompanyId> = Vec::new();
        for question in catalog.questions().iter().filter(|question| question.active) {
            if !company_ids.contains(&&question.company_id) {
                company_ids.push(&question.company_id);
            }
        }

        let groups = company_ids
            .into_iter()
            .filter(|id| company_id.map_or(true, |wanted| wanted == *id))
            .map(|id| CompanyQuestions {
                company_id: id.clone(),
                company: catalog
                    .company(id)
                    .map(|company| company.name.clone())
                    .unwrap_or_else(|| UNKNOWN_COMPANY.to_string()),
                questions: catalog
                    .questions_for_company(id)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
            .collect();

        Ok(groups)
    }

    pub fn audit(&self) -> Result<Vec<IntegrityIssue>, QuoteServiceError> {
        let catalog = self.repository.snapshot()?;
        Ok(audit_catalog(&*catalog))
    }
}

/// Error raised by the quote service.
#[derive(Debug, thiserror::Error)]
pub enum QuoteServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("plan '{0}' not found")]
    PlanNotFound(PlanId),
    #[error("plan '{0}' is inactive")]
    PlanInactive(PlanId),
}
