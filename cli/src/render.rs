//! Plain-text rendering of a store snapshot.

use todo_core::{TaskId, TodoSnapshot};

const ID_PREFIX_LEN: usize = 8;

pub fn render(snapshot: &TodoSnapshot) -> String {
    let mut out = String::new();
    if let Some(err) = &snapshot.last_error {
        out.push_str(&format!("error: {err}\n"));
    }
    for task in &snapshot.tasks {
        let mark = if task.completed { 'x' } else { ' ' };
        out.push_str(&format!("[{mark}] {}  {}\n", short_id(&task.id), task.text));
    }
    out.push_str(&snapshot.remaining_label());
    out.push('\n');
    if snapshot.can_clear_completed() {
        out.push_str(&format!(
            "{} completed (run `todo clear-completed` to remove)\n",
            snapshot.completed_count()
        ));
    }
    out
}

fn short_id(id: &TaskId) -> &str {
    let s = id.as_str();
    s.char_indices()
        .nth(ID_PREFIX_LEN)
        .map_or(s, |(end, _)| &s[..end])
}

/// Resolve a user-typed id or unique id prefix against the loaded tasks.
pub fn resolve_id(snapshot: &TodoSnapshot, query: &str) -> Option<TaskId> {
    if let Some(task) = snapshot.tasks.iter().find(|t| t.id.as_str() == query) {
        return Some(task.id.clone());
    }
    let mut matches = snapshot
        .tasks
        .iter()
        .filter(|t| t.id.as_str().starts_with(query));
    match (matches.next(), matches.next()) {
        (Some(task), None) if !query.is_empty() => Some(task.id.clone()),
        _ => None,
    }
}
