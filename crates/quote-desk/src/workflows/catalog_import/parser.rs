use super::normalizer::normalize_label;
use crate::workflows::quoting::domain::{EligibilityRule, PlanId, RuleAction, RuleId, RuleKind};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Parse a rule sheet. Rows come back in file order, which becomes evaluation order.
pub(crate) fn parse_rule_sheet<R: Read>(reader: R) -> Result<Vec<EligibilityRule>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rules = Vec::new();

    for record in csv_reader.deserialize::<RuleRow>() {
        let row = record?;
        rules.push(row.into_rule());
    }

    Ok(rules)
}

#[derive(Debug, Deserialize)]
struct RuleRow {
    id: String,
    plan_id: String,
    rule_type: String,
    entity_id: String,
    rule_action: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    active: Option<String>,
}

impl RuleRow {
    fn into_rule(self) -> EligibilityRule {
        EligibilityRule {
            id: RuleId(self.id),
            plan_id: PlanId(self.plan_id),
            kind: parse_kind(&self.rule_type),
            entity_id: self.entity_id,
            action: parse_action(&self.rule_action),
            description: self.description.unwrap_or_default(),
            active: self.active.as_deref().map(parse_flag).unwrap_or(true),
        }
    }
}

fn parse_kind(value: &str) -> RuleKind {
    match normalize_label(value).as_str() {
        "condition" | "health_condition" => RuleKind::Condition,
        "medication" => RuleKind::Medication,
        "question" => RuleKind::Question,
        _ => RuleKind::Unknown,
    }
}

fn parse_action(value: &str) -> RuleAction {
    match normalize_label(value).as_str() {
        "block_if_yes" => RuleAction::BlockIfYes,
        "block_if_no" => RuleAction::BlockIfNo,
        _ => RuleAction::Unknown,
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        normalize_label(value).as_str(),
        "false" | "no" | "n" | "0" | "inactive"
    )
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
pub(crate) fn parse_kind_for_tests(value: &str) -> RuleKind {
    parse_kind(value)
}

#[cfg(test)]
pub(crate) fn parse_action_for_tests(value: &str) -> RuleAction {
    parse_action(value)
}
