use std::collections::BTreeSet;

use tasklist_core::{Attachment, DueAt, TITLE_MAX_CHARS, TaskDraft};

pub(super) fn new_task_editor_template() -> String {
    let lines = vec![
        "# Create a new task.".to_string(),
        format!("# Title is required (at most {TITLE_MAX_CHARS} characters are kept)."),
        "# Saving an empty form cancels.".to_string(),
        "title: ".to_string(),
        "# due: YYYY-MM-DDTHH:MM, or leave blank".to_string(),
        "due: ".to_string(),
        "# attachments: comma-separated file paths".to_string(),
        "attachments: ".to_string(),
        "# Write the description below the separator. Leave blank for none.".to_string(),
        "---".to_string(),
        String::new(),
    ];
    lines.join("\n")
}

pub(super) fn edit_task_editor_template(draft: &TaskDraft) -> String {
    let due = draft.due_at.map(DueAt::to_input).unwrap_or_default();
    let attachments = draft
        .attachments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        "# Edit the selected task. Title is required.".to_string(),
        "# Empty fields clear the corresponding value.".to_string(),
        format!("title: {}", draft.title),
        "# due: YYYY-MM-DDTHH:MM, or leave blank".to_string(),
        format!("due: {due}"),
        "# attachments: comma-separated file paths".to_string(),
        format!("attachments: {attachments}"),
        "# Edit the description below the separator. Leave blank to remove it.".to_string(),
        "---".to_string(),
    ];
    match draft.description.as_deref() {
        Some(description) if !description.is_empty() => {
            lines.extend(description.lines().map(str::to_owned));
        }
        _ => lines.push(String::new()),
    }
    lines.push(String::new());
    lines.join("\n")
}

/// Parse a saved form.
///
/// `Ok(None)` means every field was left empty and the form is cancelled.
pub(super) fn parse_task_editor_output(raw: &str) -> Result<Option<TaskDraft>, String> {
    let mut title: Option<&str> = None;
    let mut due: Option<&str> = None;
    let mut attachments: Option<&str> = None;
    let mut description_lines = Vec::new();
    let mut in_description = false;

    for line in raw.lines() {
        // Everything after the separator is description text, `#` included.
        if in_description {
            description_lines.push(line);
            continue;
        }
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "---" {
            in_description = true;
            continue;
        }
        if let Some((key, value)) = trimmed.split_once(':') {
            let value = value.trim();
            match key.trim() {
                "title" => title = Some(value),
                "due" => due = Some(value),
                "attachments" => attachments = Some(value),
                unknown => {
                    return Err(format!("Unknown field: {unknown}"));
                }
            }
        } else {
            return Err(format!("Malformed field: {trimmed}"));
        }
    }

    let title = title.unwrap_or("").trim();
    let due = due.unwrap_or("").trim();
    let attachments = attachments.unwrap_or("").trim();
    let description = description_lines.join("\n");

    let is_all_empty =
        title.is_empty() && due.is_empty() && attachments.is_empty() && description.trim().is_empty();
    if is_all_empty {
        return Ok(None);
    }

    if title.is_empty() {
        return Err("Title is required".into());
    }

    let due_at = if due.is_empty() {
        None
    } else {
        Some(due.parse::<DueAt>().map_err(|err| err.to_string())?)
    };
    let attachments: BTreeSet<Attachment> = parse_list(attachments).into_iter().map(Attachment::new).collect();
    let description = if description.trim().is_empty() {
        None
    } else {
        Some(description.trim_end().to_owned())
    };

    Ok(Some(TaskDraft {
        title: title.to_owned(),
        due_at,
        description,
        attachments,
    }))
}

pub(super) fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
