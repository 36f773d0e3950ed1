use anyhow::{Context, Result};
use chrono::NaiveTime;
use uuid::Uuid;

use planner_lib::schedule::{ScheduleEditor, WeekdayKey};

use super::show::print_schedule;
use crate::app::App;
use crate::OutputFormat;

/// Open the student's schedule, apply one edit, save it and print the result
fn edit_and_save<F>(app: &App, student_id: Uuid, format: &OutputFormat, use_color: bool, edit: F) -> Result<()>
where
    F: FnOnce(&mut ScheduleEditor) -> Result<()>,
{
    let mut editor = app.open_editor(student_id)?;
    edit(&mut editor)?;

    if editor.is_dirty() {
        editor
            .confirm(&app.storage)
            .with_context(|| format!("Schedule for {} was not saved", student_id))?;
    }

    print_schedule(editor.schedule(), format, use_color)
}

fn report_propagation(day: WeekdayKey, touched: &[WeekdayKey]) {
    let others: Vec<&str> = touched
        .iter()
        .filter(|d| **d != day)
        .map(|d| d.label())
        .collect();
    if !others.is_empty() {
        eprintln!("Uniform schedule: also updated {}", others.join(", "));
    } else if touched.is_empty() {
        eprintln!("{} already had that value.", day);
    }
}

pub fn run_toggle(app: &App, student_id: Uuid, day: WeekdayKey, format: &OutputFormat, use_color: bool) -> Result<()> {
    edit_and_save(app, student_id, format, use_color, |editor| {
        let selected = editor.toggle_day(day);
        eprintln!("{} {}", day, if selected { "added to the plan" } else { "removed from the plan" });
        Ok(())
    })
}

pub fn run_start(
    app: &App,
    student_id: Uuid,
    day: WeekdayKey,
    time: NaiveTime,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    edit_and_save(app, student_id, format, use_color, |editor| {
        let touched = editor.set_start_time(day, time);
        report_propagation(day, &touched);
        Ok(())
    })
}

pub fn run_end(
    app: &App,
    student_id: Uuid,
    day: WeekdayKey,
    time: NaiveTime,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    edit_and_save(app, student_id, format, use_color, |editor| {
        let touched = editor.set_end_time(day, time);
        report_propagation(day, &touched);
        Ok(())
    })
}

pub fn run_block(
    app: &App,
    student_id: Uuid,
    day: WeekdayKey,
    minutes: u32,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    edit_and_save(app, student_id, format, use_color, |editor| {
        if !editor.is_offered_block_length(minutes) {
            log::warn!("{} minutes is not one of the configured block lengths", minutes);
        }
        let touched = editor.set_block_length(day, minutes)?;
        report_propagation(day, &touched);
        Ok(())
    })
}

pub fn run_uniform(app: &App, student_id: Uuid, enabled: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    edit_and_save(app, student_id, format, use_color, |editor| {
        match editor.set_uniform(enabled) {
            Some(alignment) if !alignment.realigned.is_empty() => {
                let days: Vec<&str> = alignment.realigned.iter().map(|d| d.label()).collect();
                eprintln!(
                    "Uniform schedule on: copied {}'s times to {}",
                    alignment.reference,
                    days.join(", ")
                );
            }
            Some(alignment) => {
                eprintln!("Uniform schedule on: all days already match {}", alignment.reference);
            }
            None if enabled => eprintln!("Uniform schedule on: no days selected yet"),
            None => eprintln!("Uniform schedule off"),
        }
        Ok(())
    })
}
