use anyhow::{bail, Result};
use uuid::Uuid;

use planner_lib::schedule::{block_slots, format_time, WeekdayKey, WeeklySchedule};

use crate::app::App;
use crate::render::terminal::render_schedule;
use crate::OutputFormat;

pub fn run(app: &App, student_id: Uuid, format: &OutputFormat, use_color: bool) -> Result<()> {
    let editor = app.open_editor(student_id)?;
    print_schedule(editor.schedule(), format, use_color)
}

pub fn print_schedule(schedule: &WeeklySchedule, format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "schedule": schedule,
                "selectedDays": schedule.selected_days(),
                "totalBlocks": schedule.total_blocks(),
                "totalMinutes": schedule.total_minutes(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", render_schedule(schedule, use_color));
        }
    }
    Ok(())
}

pub fn run_slots(app: &App, student_id: Uuid, day: WeekdayKey, format: &OutputFormat) -> Result<()> {
    let editor = app.open_editor(student_id)?;
    let Some(window) = editor.schedule().day(day).window() else {
        bail!("{} has no time window configured", day);
    };
    let slots = block_slots(window);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&slots)?);
        }
        OutputFormat::Plain => {
            if slots.is_empty() {
                println!("No whole blocks fit in {}'s window.", day);
                return Ok(());
            }
            for slot in &slots {
                println!(
                    "Block {:>2}  {} - {}",
                    slot.index + 1,
                    format_time(slot.start),
                    format_time(slot.end)
                );
            }
        }
    }

    Ok(())
}
