//! Parsing of chat answers and recommendation lists.

use super::AssistantError;
use crate::task::domain::{Task, TaskId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Prefix of the machine-readable line listing suggested task identifiers.
pub const SUGGESTIONS_MARKER: &str = "SUGGESTIONS:";

/// Recommendations surfaced at most.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// A chat answer split into display text and suggested tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    /// Answer text with the marker line removed.
    #[serde(rename = "response")]
    pub text: String,
    /// Suggested tasks, in the model's order.
    pub suggestions: Vec<TaskId>,
}

impl AssistantReply {
    /// Parses a raw model answer against the task list it was asked about.
    ///
    /// The last `SUGGESTIONS: [...]` line is removed from the text and its
    /// JSON array read. Identifiers that are malformed, unknown, completed
    /// or repeated are dropped. An unreadable array yields no suggestions.
    #[must_use]
    pub fn parse(raw: &str, tasks: &[Task]) -> Self {
        let Some((before, after)) = raw.rsplit_once(SUGGESTIONS_MARKER) else {
            return Self {
                text: raw.trim().to_owned(),
                suggestions: Vec::new(),
            };
        };
        let (listing, rest) = after.split_once('\n').unwrap_or((after, ""));
        let text = [before.trim(), rest.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            text,
            suggestions: open_task_ids(listing, tasks),
        }
    }
}

fn open_task_ids(listing: &str, tasks: &[Task]) -> Vec<TaskId> {
    let entries: Vec<Value> = match serde_json::from_str(listing.trim()) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(error = %err, "ignoring unreadable suggestion list");
            return Vec::new();
        }
    };
    let open: HashSet<&TaskId> = tasks
        .iter()
        .filter(|task| !task.is_completed())
        .map(Task::id)
        .collect();
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter_map(task_id)
        .filter(|id| open.contains(id) && seen.insert(id.clone()))
        .collect()
}

/// Reads an identifier the model echoed back as a string or a number.
fn task_id(value: &Value) -> Option<TaskId> {
    TaskId::deserialize(value).ok()
}

/// One recommended task with the model's reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommended task.
    pub id: TaskId,
    /// Why it was recommended.
    pub reason: String,
}

/// Wire form of a recommendation answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationList {
    /// At most [`MAX_RECOMMENDATIONS`] entries.
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationList {
    /// Parses the JSON object embedded in a raw model answer.
    ///
    /// Text around the outermost braces is ignored. Entries without a
    /// readable `id` or a non-blank `reason` are dropped, and at most
    /// [`MAX_RECOMMENDATIONS`] are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Unparsable`] when no JSON object with a
    /// `recommendations` array can be found.
    pub fn parse(raw: &str) -> Result<Self, AssistantError> {
        let object = raw
            .find('{')
            .zip(raw.rfind('}'))
            .and_then(|(start, end)| raw.get(start..=end))
            .ok_or_else(|| AssistantError::Unparsable("no JSON object in answer".to_owned()))?;
        let value: Value = serde_json::from_str(object)
            .map_err(|err| AssistantError::Unparsable(err.to_string()))?;
        let entries = value
            .get("recommendations")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                AssistantError::Unparsable("missing recommendations array".to_owned())
            })?;
        let recommendations = entries
            .iter()
            .filter_map(recommendation)
            .take(MAX_RECOMMENDATIONS)
            .collect();
        Ok(Self { recommendations })
    }
}

fn recommendation(entry: &Value) -> Option<Recommendation> {
    let id = entry.get("id").and_then(task_id)?;
    let reason = entry.get("reason")?.as_str()?.trim();
    (!reason.is_empty()).then(|| Recommendation {
        id,
        reason: reason.to_owned(),
    })
}
