//! Prompt templates for chat and recommendations.
//!
//! The ranking rules are prose for the model. Only the request shape and
//! the handling of the answer are under test; the order the model picks is
//! advisory.

use crate::assistant::domain::{AssistantError, ChatRequest, MAX_RECOMMENDATIONS, TaskBrief};
use crate::assistant::ports::Prompt;
use crate::insight::Moment;
use crate::task::domain::Task;
use minijinja::{Environment, Value, context};
use serde::Serialize;

/// Suggested identifiers the chat answer may list at most.
pub const MAX_CHAT_SUGGESTIONS: usize = 5;

/// Ranking rules and exclusions shared by both prompts.
pub const PRIORITY_RULES: &str = "\
Rank open tasks by these rules, highest first:
1. Overdue tasks that block a parent (their parent has hasIncompleteChildren set because of them).
2. Any other overdue task (isOverdue).
3. Preparation for a meeting held today or tomorrow (isMeetingPrep).
4. Tasks due today (isDueToday), then tasks marked end of day (isEOD).
5. Tasks due tomorrow (isDueTomorrow).
6. Tasks due within the next 3 days.
7. Tasks due later, nearest deadline first.
8. Tasks without a due date, P0 before P1 before P2.
Within one rule prefer higher priority, then quick wins.

Hard exclusions. Never suggest:
- a completed task;
- a task of type \"blocker\";
- a task of type \"meeting\"; suggest its preparation children instead.
Tasks with isNotStarted set have not reached their start date yet and should only be mentioned, not suggested.";

const CHAT_SYSTEM_TEMPLATE: &str = "\
You are a calm, practical planning assistant inside a personal task board.
Today is {{ today }}. Every task carries derived flags (isOverdue, isDueToday, isDueTomorrow, daysUntilDue, isMeetingPrep, hasIncompleteChildren, hasBlockerChild, isNotStarted); trust them over your own date arithmetic.

{{ rules }}

Answer briefly and conversationally. When you recommend tasks, finish with exactly one final line of the form
SUGGESTIONS: [\"<task id>\", ...]
listing at most {{ max_suggestions }} task ids in the order they should be done. Leave the line out when you have nothing to suggest.";

const CHAT_USER_TEMPLATE: &str = "\
{% if priorities %}Current priority list, in order:
{% for task in priorities %}{{ loop.index }}. {{ task.text }} ({{ task.id }})
{% endfor %}
{% endif %}Open tasks ({{ shown }}{% if total > shown %} of {{ total }}{% endif %}) as JSON:
{{ tasks_json }}

Question: {{ message }}";

const RECOMMEND_SYSTEM_TEMPLATE: &str = "\
You pick what someone should work on next from their task board.
Today is {{ today }}.

{{ rules }}

Reply with JSON only, no prose, in exactly this shape:
{\"recommendations\": [{\"id\": \"<task id>\", \"reason\": \"<one short sentence>\"}]}
Return at most {{ max_recommendations }} entries.";

const RECOMMEND_USER_TEMPLATE: &str = "\
Open tasks ({{ shown }}{% if total > shown %} of {{ total }}{% endif %}) as JSON:
{{ tasks_json }}

Recommend up to {{ max_recommendations }} tasks to focus on next.";

#[derive(Serialize)]
struct ListedTask {
    id: String,
    text: String,
}

/// Builds the chat prompt for `request`.
///
/// # Errors
///
/// Returns [`AssistantError::Prompt`] when rendering fails.
pub fn chat_prompt(request: &ChatRequest, moment: &Moment) -> Result<Prompt, AssistantError> {
    let briefs = TaskBrief::collect(&request.todos, moment);
    let priorities: Vec<ListedTask> = request
        .priority_todos
        .iter()
        .map(|task| ListedTask {
            id: task.id().to_string(),
            text: task.text().to_string(),
        })
        .collect();
    let system = render(
        CHAT_SYSTEM_TEMPLATE,
        context! {
            today => today(moment),
            rules => PRIORITY_RULES,
            max_suggestions => MAX_CHAT_SUGGESTIONS,
        },
    )?;
    let user = render(
        CHAT_USER_TEMPLATE,
        context! {
            priorities => priorities,
            shown => briefs.len(),
            total => open_count(&request.todos),
            tasks_json => to_json(&briefs)?,
            message => request.message.trim(),
        },
    )?;
    Ok(Prompt { system, user })
}

/// Builds the recommendation prompt for `todos`.
///
/// # Errors
///
/// Returns [`AssistantError::Prompt`] when rendering fails.
pub fn recommendation_prompt(todos: &[Task], moment: &Moment) -> Result<Prompt, AssistantError> {
    let briefs = TaskBrief::collect(todos, moment);
    let system = render(
        RECOMMEND_SYSTEM_TEMPLATE,
        context! {
            today => today(moment),
            rules => PRIORITY_RULES,
            max_recommendations => MAX_RECOMMENDATIONS,
        },
    )?;
    let user = render(
        RECOMMEND_USER_TEMPLATE,
        context! {
            shown => briefs.len(),
            total => open_count(todos),
            tasks_json => to_json(&briefs)?,
            max_recommendations => MAX_RECOMMENDATIONS,
        },
    )?;
    Ok(Prompt { system, user })
}

fn render(template: &str, context: Value) -> Result<String, AssistantError> {
    let environment = Environment::new();
    environment
        .render_str(template, context)
        .map_err(|err| AssistantError::Prompt(err.to_string()))
}

fn to_json(briefs: &[TaskBrief]) -> Result<String, AssistantError> {
    serde_json::to_string_pretty(briefs).map_err(|err| AssistantError::Prompt(err.to_string()))
}

fn today(moment: &Moment) -> String {
    moment.today().format("%A %Y-%m-%d").to_string()
}

fn open_count(todos: &[Task]) -> usize {
    todos.iter().filter(|task| !task.is_completed()).count()
}
