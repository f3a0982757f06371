use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::{self, CompanyId, HealthCondition, Medication, PlanId};
use super::intake::QuoteRequest;
use super::repository::CatalogRepository;
use super::service::{CompanyQuestions, PlanCheck, QuoteReport, QuoteService};
use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    #[serde(default)]
    pub(crate) search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QuestionParams {
    #[serde(default)]
    pub(crate) company_id: Option<String>,
}

/// Router builder exposing quoting and catalog lookup endpoints.
pub fn quote_router<C>(service: Arc<QuoteService<C>>) -> Router
where
    C: CatalogRepository + 'static,
{
    Router::new()
        .route("/api/v1/quotes", post(quote_handler::<C>))
        .route(
            "/api/v1/quotes/plans/:plan_id",
            post(plan_check_handler::<C>),
        )
        .route("/api/v1/catalog/states", get(states_handler::<C>))
        .route("/api/v1/catalog/conditions", get(conditions_handler::<C>))
        .route("/api/v1/catalog/medications", get(medications_handler::<C>))
        .route("/api/v1/catalog/questions", get(questions_handler::<C>))
        .route("/api/v1/catalog/integrity", get(integrity_handler::<C>))
        .with_state(service)
}

pub(crate) async fn quote_handler<C>(
    State(service): State<Arc<QuoteService<C>>>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteReport>, AppError>
where
    C: CatalogRepository + 'static,
{
    Ok(Json(service.quote(request)?))
}

pub(crate) async fn plan_check_handler<C>(
    State(service): State<Arc<QuoteService<C>>>,
    Path(plan_id): Path<String>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<PlanCheck>, AppError>
where
    C: CatalogRepository + 'static,
{
    Ok(Json(service.check_plan(&PlanId(plan_id), request)?))
}

pub(crate) async fn states_handler<C>(
    State(service): State<Arc<QuoteService<C>>>,
) -> Result<Json<Vec<domain::State>>, AppError>
where
    C: CatalogRepository + 'static,
{
    Ok(Json(service.states()?))
}

pub(crate) async fn conditions_handler<C>(
    State(service): State<Arc<QuoteService<C>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<HealthCondition>>, AppError>
where
    C: CatalogRepository + 'static,
{
    let search = params.search.as_deref().unwrap_or_default();
    Ok(Json(service.conditions(search)?))
}

pub(crate) async fn medications_handler<C>(
    State(service): State<Arc<QuoteService<C>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Medication>>, AppError>
where
    C: CatalogRepository + 'static,
{
    let search = params.search.as_deref().unwrap_or_default();
    Ok(Json(service.medications(search)?))
}

pub(crate) async fn questions_handler<C>(
    State(service): State<Arc<QuoteService<C>>>,
    Query(params): Query<QuestionParams>,
) -> Result<Json<Vec<CompanyQuestions>>, AppError>
where
    C: CatalogRepository + 'static,
{
    let company_id = params.company_id.map(CompanyId);
    Ok(Json(service.questions(company_id.as_ref())?))
}

pub(crate) async fn integrity_handler<C>(
    State(service): State<Arc<QuoteService<C>>>,
) -> Result<Json<Value>, AppError>
where
    C: CatalogRepository + 'static,
{
    let issues = service.audit()?;
    let details: Vec<String> = issues.iter().map(|issue| issue.summary()).collect();
    Ok(Json(json!({
        "issue_count": issues.len(),
        "issues": issues,
        "details": details,
    })))
}
