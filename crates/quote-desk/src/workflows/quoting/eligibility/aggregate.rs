use serde::{Deserialize, Serialize};

use super::super::catalog::ReferenceCatalog;
use super::super::domain::{ClientProfile, Plan, PlanId};
use super::resolver::resolve;

pub const UNKNOWN_COMPANY: &str = "Unknown Company";
pub const UNKNOWN_PLAN_TYPE: &str = "Unknown Type";

/// Presentation row for a plan in a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResult {
    pub id: PlanId,
    pub name: String,
    pub company: String,
    pub plan_type: String,
    pub reason: String,
}

/// Eligible plans for one carrier, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyGroup {
    pub company: String,
    pub plans: Vec<PlanResult>,
}

/// Partitioned quote. Every active plan lands in exactly one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub eligible_plans: Vec<PlanResult>,
    pub ineligible_plans: Vec<PlanResult>,
}

impl QuoteResult {
    /// Group eligible plans by company name, companies in order of first appearance.
    pub fn grouped_by_company(&self) -> Vec<CompanyGroup> {
        let mut groups: Vec<CompanyGroup> = Vec::new();
        for plan in &self.eligible_plans {
            match groups.iter_mut().find(|group| group.company == plan.company) {
                Some(group) => group.plans.push(plan.clone()),
                None => groups.push(CompanyGroup {
                    company: plan.company.clone(),
                    plans: vec![plan.clone()],
                }),
            }
        }
        groups
    }

    pub fn total(&self) -> usize {
        self.eligible_plans.len() + self.ineligible_plans.len()
    }
}

/// Run the resolver over every active plan and partition the results.
pub fn get_eligible_plans<C>(profile: &ClientProfile, catalog: &C) -> QuoteResult
where
    C: ReferenceCatalog + ?Sized,
{
    let mut result = QuoteResult::default();

    for plan in catalog.active_plans() {
        let outcome = resolve(plan, profile, catalog);
        let row = plan_result(plan, outcome.reason, catalog);

        if outcome.eligible {
            result.eligible_plans.push(row);
        } else {
            result.ineligible_plans.push(row);
        }
    }

    result
}

pub(crate) fn plan_result<C>(plan: &Plan, reason: String, catalog: &C) -> PlanResult
where
    C: ReferenceCatalog + ?Sized,
{
    let company = catalog
        .company(&plan.company_id)
        .map(|company| company.name.clone())
        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string());
    let plan_type = catalog
        .plan_type(&plan.plan_type_id)
        .map(|plan_type| plan_type.name.clone())
        .unwrap_or_else(|| UNKNOWN_PLAN_TYPE.to_string());

    PlanResult {
        id: plan.id.clone(),
        name: plan.name.clone(),
        company,
        plan_type,
        reason,
    }
}
