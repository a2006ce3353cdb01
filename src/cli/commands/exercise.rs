//! Exercise catalog command implementation.

use colored::Colorize;

use super::Context;
use crate::cli::args::{ExerciseCommands, OutputFormat};
use crate::error::FitError;
use crate::features::catalog::{add_custom_exercise, remove_custom_exercise, Catalog, Category};
use crate::output::{format_exercise, format_exercises, to_json};

/// Execute exercise subcommands.
///
/// # Errors
///
/// Returns an error for an unknown category or exercise, an invalid custom
/// exercise, or a catalog file that cannot be read or written.
pub fn exercise(ctx: &Context, cmd: ExerciseCommands) -> Result<String, FitError> {
    let catalog = Catalog::load(&ctx.paths)?;

    match cmd {
        ExerciseCommands::List { category, search } => {
            let category = category.as_deref().map(parse_category).transpose()?;
            let mut exercises = match (&search, category) {
                (Some(query), _) => catalog.search(query),
                (None, Some(category)) => catalog.by_category(category),
                (None, None) => catalog.list(),
            };
            if let (Some(_), Some(category)) = (&search, category) {
                exercises.retain(|e| e.category == category);
            }
            format_exercises(&exercises, &catalog, ctx.format)
        }
        ExerciseCommands::Show { id } => {
            let info = catalog
                .get(&id)
                .ok_or_else(|| FitError::NotFound(format!("Exercise '{id}'")))?;
            format_exercise(info, ctx.weight_kg(None)?, ctx.format)
        }
        ExerciseCommands::Add {
            name,
            id,
            category,
            met,
            description,
        } => {
            let category = parse_category(&category)?;
            let info = add_custom_exercise(
                &ctx.paths,
                &catalog,
                id.as_deref(),
                &name,
                category,
                met,
                description,
            )?;
            match ctx.format {
                OutputFormat::Pretty => Ok(format!(
                    "{} exercise '{}' ({}, MET {})",
                    "Added".green(),
                    info.name,
                    info.id,
                    info.met
                )),
                OutputFormat::Json => to_json(&info),
            }
        }
        ExerciseCommands::Remove { id } => {
            remove_custom_exercise(&ctx.paths, &catalog, &id)?;
            match ctx.format {
                OutputFormat::Pretty => Ok(format!("{} exercise '{id}'", "Removed".green())),
                OutputFormat::Json => to_json(&serde_json::json!({ "removed": id })),
            }
        }
    }
}

fn parse_category(s: &str) -> Result<Category, FitError> {
    Category::parse(s).ok_or_else(|| {
        let known: Vec<_> = Category::ALL.iter().map(Category::display_name).collect();
        FitError::Parse(format!(
            "Unknown category '{s}'. Expected one of: {}",
            known.join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Paths};
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> Context {
        Context::new(
            Paths::with_root(dir.path().to_path_buf()),
            Config::default(),
            OutputFormat::Json,
        )
    }

    #[test]
    fn test_list_by_category() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let out = exercise(
            &ctx,
            ExerciseCommands::List {
                category: Some("core".to_string()),
                search: None,
            },
        )
        .unwrap();
        assert!(out.contains("plank"));
        assert!(!out.contains("squats"));
    }

    #[test]
    fn test_unknown_category() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let result = exercise(
            &ctx,
            ExerciseCommands::List {
                category: Some("juggling".to_string()),
                search: None,
            },
        );
        assert!(matches!(result, Err(FitError::Parse(_))));
    }

    #[test]
    fn test_add_then_show() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        exercise(
            &ctx,
            ExerciseCommands::Add {
                name: "Battle Ropes".to_string(),
                id: None,
                category: "cardio".to_string(),
                met: 10.3,
                description: None,
            },
        )
        .unwrap();

        let out = exercise(
            &ctx,
            ExerciseCommands::Show {
                id: "battle-ropes".to_string(),
            },
        )
        .unwrap();
        assert!(out.contains("Battle Ropes"));

        exercise(
            &ctx,
            ExerciseCommands::Remove {
                id: "battle-ropes".to_string(),
            },
        )
        .unwrap();
        let result = exercise(
            &ctx,
            ExerciseCommands::Show {
                id: "battle-ropes".to_string(),
            },
        );
        assert!(matches!(result, Err(FitError::NotFound(_))));
    }

    #[test]
    fn test_builtin_cannot_be_removed() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let result = exercise(
            &ctx,
            ExerciseCommands::Remove {
                id: "squats".to_string(),
            },
        );
        assert!(matches!(result, Err(FitError::Config(_))));
    }
}
