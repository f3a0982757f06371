use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::catalog::ReferenceCatalog;
use super::domain::{Answer, ClientProfile, ConditionId, MedicationId, QuestionId, StateId};

/// Agent selections as submitted from the quote form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Display only. The form posts it as text, so blank or unreadable values become `None`.
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: Option<u8>,
    pub state: String,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    /// `null` keeps a question explicitly unanswered.
    #[serde(default)]
    pub answers: BTreeMap<String, Option<bool>>,
}

fn lenient_age<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_u64().and_then(|age| u8::try_from(age).ok()),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Assembles immutable [`ClientProfile`] values from raw requests.
///
/// Intake only normalizes; it never rejects. The submitted state is matched against the
/// catalog's state ids and postal codes; an unmatched value is kept as typed and simply fails
/// the availability check of every plan downstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileIntake;

impl ProfileIntake {
    pub fn profile_from_request<R>(&self, request: QuoteRequest, catalog: &R) -> ClientProfile
    where
        R: ReferenceCatalog + ?Sized,
    {
        let state = catalog
            .find_state(&request.state)
            .map(|state| state.id.clone())
            .unwrap_or_else(|| StateId(request.state.trim().to_string()));

        let conditions = normalized_ids(request.conditions)
            .map(ConditionId)
            .collect::<BTreeSet<_>>();
        let medications = normalized_ids(request.medications)
            .map(MedicationId)
            .collect::<BTreeSet<_>>();

        let answers = request
            .answers
            .into_iter()
            .filter_map(|(id, answer)| {
                let id = id.trim().to_string();
                (!id.is_empty()).then(|| (QuestionId(id), Answer::from(answer)))
            })
            .collect();

        ClientProfile {
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            age: request.age,
            state,
            conditions,
            medications,
            answers,
        }
    }
}

fn normalized_ids(ids: Vec<String>) -> impl Iterator<Item = String> {
    ids.into_iter()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}
