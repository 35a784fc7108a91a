//! `show`: print the merged configuration

use crate::application::context::TaskContext;
use crate::domain::ports::TaskEvent;
use crate::domain::value_objects::StepOutcome;
use crate::error::PapResult;

/// Output format of `show`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowFormat {
    #[default]
    Yaml,
    Json,
}

/// Key that prints the stage overview instead of a sub-tree
pub const STAGES_KEY: &str = "stages";

pub fn show(ctx: &TaskContext, key: Option<&str>, format: ShowFormat) -> PapResult<StepOutcome> {
    let key = key.unwrap_or("");
    if key == STAGES_KEY && format == ShowFormat::Yaml {
        return stages(ctx);
    }

    let Some(value) = ctx.config().get(key) else {
        return ctx.skip("Key not configured");
    };
    let text = match format {
        ShowFormat::Yaml => serde_yaml_ng::to_string(value)?,
        ShowFormat::Json => serde_json::to_string_pretty(value).map_err(std::io::Error::from)?,
    };
    ctx.emit(TaskEvent::Output {
        text: text.trim_end().to_string(),
    });
    Ok(StepOutcome::Success)
}

/// Table of configured stages
fn stages(ctx: &TaskContext) -> PapResult<StepOutcome> {
    let mut rows = vec![["Stage".to_string(), "Host".to_string(), "Origin".to_string()]];
    for stage in ctx.config().stages() {
        rows.push([
            stage.name.clone(),
            stage.host.clone().unwrap_or_else(|| "-".to_string()),
            stage.origin().unwrap_or("-").to_string(),
        ]);
    }

    let mut widths = [0usize; 3];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let text = rows
        .iter()
        .map(|row| {
            format!(
                "{:<w0$}  {:<w1$}  {}",
                row[0],
                row[1],
                row[2],
                w0 = widths[0],
                w1 = widths[1]
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    ctx.emit(TaskEvent::Output { text });
    Ok(StepOutcome::Success)
}
