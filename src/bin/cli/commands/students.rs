use anyhow::{Context, Result};
use uuid::Uuid;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat) -> Result<()> {
    let students = app.storage.list_students()?;

    match format {
        OutputFormat::Json => {
            let ids: Vec<String> = students.iter().map(|id| id.to_string()).collect();
            println!("{}", serde_json::to_string_pretty(&ids)?);
        }
        OutputFormat::Plain => {
            if students.is_empty() {
                println!("No stored schedules.");
                return Ok(());
            }
            for id in &students {
                println!("{}", id);
            }
        }
    }

    Ok(())
}

pub fn run_reset(app: &App, student_id: Uuid, format: &OutputFormat) -> Result<()> {
    app.storage
        .delete_schedule(student_id)
        .with_context(|| format!("Failed to reset schedule for student {}", student_id))?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "deleted": student_id.to_string() });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => println!("Deleted schedule for {}", student_id),
    }

    Ok(())
}
