use planner_lib::schedule::{format_time, DaySchedule, WeekdayKey, WeeklySchedule};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render the week as a table, one row per day
pub fn render_schedule(schedule: &WeeklySchedule, use_color: bool) -> String {
    let mut lines = Vec::new();

    let mode = if schedule.is_uniform() { "uniform" } else { "per-day" };
    lines.push(paint(&format!("Weekly schedule ({})", mode), Color::BOLD, use_color));
    lines.push(paint(
        &format!("{:<12}{:<8}{:<8}{:>8}{:>8}", "Day", "Start", "End", "Block", "Blocks"),
        Color::DIM,
        use_color,
    ));

    for (key, day) in schedule.days() {
        lines.push(render_day(key, day, use_color));
    }

    let total_minutes = schedule.total_minutes();
    lines.push(String::new());
    lines.push(format!(
        "{} blocks across {} day(s), {}h{:02}m",
        paint(&schedule.total_blocks().to_string(), Color::CYAN, use_color),
        schedule.selected_days().len(),
        total_minutes / 60,
        total_minutes % 60
    ));

    lines.join("\n")
}

fn render_day(key: WeekdayKey, day: &DaySchedule, use_color: bool) -> String {
    let marker = if day.is_selected() { "[x]" } else { "[ ]" };

    let row = match day.window() {
        Some(window) => {
            let end = if window.is_overnight() {
                format!("{}+", format_time(window.end_time()))
            } else {
                format_time(window.end_time())
            };
            format!(
                "{} {:<8}{:<8}{:<8}{:>7}m{:>8}",
                marker,
                key.label(),
                format_time(window.start_time()),
                end,
                window.block_length_minutes(),
                window.blocks()
            )
        }
        None => format!("{} {:<8}{}", marker, key.label(), "not configured"),
    };

    if !day.is_selected() {
        paint(&row, Color::DIM, use_color)
    } else if day.blocks() == 0 {
        paint(&row, Color::YELLOW, use_color)
    } else {
        paint(&row, Color::GREEN, use_color)
    }
}
