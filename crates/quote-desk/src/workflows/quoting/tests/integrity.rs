use super::common::*;
use crate::workflows::quoting::domain::{
    CompanyId, PlanId, PlanTypeId, QuestionId, RuleAction, RuleId, RuleKind, StateId,
};
use crate::workflows::quoting::integrity::{audit_catalog, IntegrityIssue};

#[test]
fn clean_catalogs_have_no_issues() {
    assert!(audit_catalog(&catalog()).is_empty());
    assert!(audit_catalog(&seed_catalog()).is_empty());
}

#[test]
fn plan_references_are_checked() {
    let mut document = document();
    document.plans[0].company_id = CompanyId::new("gone");
    document.plans[0].plan_type_id = PlanTypeId::new("gone");
    document.plans[0].state_ids.insert(StateId::new("ZZ"));
    document.plans[1].state_ids.clear();

    let issues = audit_catalog(&snapshot(document));

    assert_eq!(
        issues,
        vec![
            IntegrityIssue::UnknownCompany {
                plan_id: PlanId::new("gi"),
                company_id: "gone".to_string(),
            },
            IntegrityIssue::UnknownPlanType {
                plan_id: PlanId::new("gi"),
                plan_type_id: "gone".to_string(),
            },
            IntegrityIssue::UnknownState {
                plan_id: PlanId::new("gi"),
                state_id: "ZZ".to_string(),
            },
            IntegrityIssue::PlanOfferedNowhere {
                plan_id: PlanId::new("gs"),
            },
        ]
    );
}

#[test]
fn rule_targets_and_values_are_checked() {
    let mut document = document();
    document.conditions[1].active = false;
    document.rules = vec![
        rule("inactive", "gi", RuleKind::Condition, "mi", RuleAction::BlockIfYes),
        rule("orphan", "missing", RuleKind::Condition, "stroke", RuleAction::BlockIfYes),
        rule("odd-kind", "gi", RuleKind::Unknown, "stroke", RuleAction::BlockIfYes),
        rule("odd-action", "gi", RuleKind::Medication, "warfarin", RuleAction::Unknown),
    ];

    let issues = audit_catalog(&snapshot(document));

    assert_eq!(
        issues,
        vec![
            IntegrityIssue::InactiveRuleTarget {
                rule_id: RuleId::new("inactive"),
                kind: "condition",
                entity_id: "mi".to_string(),
            },
            IntegrityIssue::RuleForMissingPlan {
                rule_id: RuleId::new("orphan"),
                plan_id: PlanId::new("missing"),
            },
            IntegrityIssue::UnknownRuleKind {
                rule_id: RuleId::new("odd-kind"),
            },
            IntegrityIssue::UnknownRuleAction {
                rule_id: RuleId::new("odd-action"),
            },
        ]
    );
}

#[test]
fn questions_of_unknown_companies_are_reported() {
    let mut document = document();
    document.questions[1].company_id = CompanyId::new("gone");

    let issues = audit_catalog(&snapshot(document));

    assert_eq!(
        issues,
        vec![IntegrityIssue::QuestionForUnknownCompany {
            question_id: QuestionId::new("q3"),
            company_id: "gone".to_string(),
        }]
    );
    assert_eq!(
        issues[0].summary(),
        "question q3 belongs to missing company 'gone'"
    );
}

#[test]
fn issues_serialize_with_a_tag() {
    let issue = IntegrityIssue::PlanOfferedNowhere {
        plan_id: PlanId::new("gs"),
    };

    let value = serde_json::to_value(&issue).expect("serializes");

    assert_eq!(
        value,
        serde_json::json!({ "issue": "plan_offered_nowhere", "plan_id": "gs" })
    );
}
