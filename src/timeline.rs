use crate::domain::{block_widths, today_list, SubTask, TaskView};

/// Cells in a rendered timeline bar
pub const DEFAULT_BAR_WIDTH: usize = 48;

/// Shade pair alternated so adjacent blocks stay distinguishable
const BLOCK_SHADES: [char; 2] = ['█', '░'];

/// Format minutes as "Xh Ym", "Xh" or "Xm"
pub fn format_minutes(mins: i64) -> String {
    if mins < 60 {
        format!("{}m", mins)
    } else {
        let hours = mins / 60;
        let rest = mins % 60;
        if rest == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, rest)
        }
    }
}

/// Render one main task as a header line, a proportional bar over its
/// scheduled sub-tasks, and a numbered legend. Sub-tasks pulled into the
/// focus list do not occupy timeline space.
pub fn render_task(view: &TaskView, bar_width: usize) -> String {
    let mut out = String::new();

    let short_id = &view.task.id.to_string()[..8];
    out.push_str(&format!(
        "{}  {} · {}",
        short_id,
        view.task.title,
        format_minutes(view.task.total_duration)
    ));
    if let Some(project) = &view.project {
        out.push_str(&format!("  [{}]", project.title));
    }
    out.push('\n');

    let scheduled: Vec<&SubTask> = view.scheduled().collect();
    if scheduled.is_empty() {
        out.push_str("  (no scheduled sub-tasks)\n");
        return out;
    }

    let widths = block_widths(&scheduled, bar_width);
    out.push_str("  ");
    for (i, width) in widths.iter().enumerate() {
        let shade = BLOCK_SHADES[i % BLOCK_SHADES.len()];
        for _ in 0..*width {
            out.push(shade);
        }
    }
    out.push('\n');

    for (i, sub) in scheduled.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {}  {} · {}  [{}]\n",
            i + 1,
            &sub.id.to_string()[..8],
            sub.title,
            format_minutes(sub.estimated_time),
            sub.status.to_tag()
        ));
    }

    out
}

/// Render the whole timeline: every main task in start-time order
pub fn render_timeline(views: &[TaskView], bar_width: usize) -> String {
    if views.is_empty() {
        return "No tasks yet. Add one with `timecut add`.\n".to_string();
    }

    let mut out = String::new();
    for view in views {
        out.push_str(&render_task(view, bar_width));
        out.push('\n');
    }
    out
}

/// Render the daily focus list in rank order
pub fn render_today(views: &[TaskView]) -> String {
    let all_subs: Vec<SubTask> = views
        .iter()
        .flat_map(|v| v.sub_tasks.iter().cloned())
        .collect();
    let focused = today_list(&all_subs);

    let mut out = String::from("Today\n");
    if focused.is_empty() {
        out.push_str("  (empty — pull a sub-task in with `timecut focus`)\n");
        return out;
    }

    for (i, sub) in focused.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {}  {} · {}\n",
            i + 1,
            &sub.id.to_string()[..8],
            sub.title,
            format_minutes(sub.estimated_time)
        ));
    }
    out
}
