//! Profile command implementation.

use colored::Colorize;

use super::Context;
use crate::cli::args::{OutputFormat, ProfileCommands};
use crate::error::FitError;
use crate::output::format_profile;

/// Execute profile subcommands.
///
/// # Errors
///
/// Returns an error if the weight is out of range or the config file cannot
/// be written.
pub fn profile(ctx: &Context, cmd: ProfileCommands) -> Result<String, FitError> {
    match cmd {
        ProfileCommands::Show => format_profile(&ctx.config.profile, ctx.format),
        ProfileCommands::Set { name, weight } => {
            if name.is_none() && weight.is_none() {
                return Err(FitError::Parse(
                    "Nothing to change. Pass --name or --weight.".to_string(),
                ));
            }

            let mut config = ctx.config.clone();
            if let Some(weight) = weight {
                config.profile.set_weight(weight)?;
            }
            if let Some(name) = name {
                let name = name.trim();
                config.profile.name = (!name.is_empty()).then(|| name.to_string());
            }

            ctx.paths.ensure_dirs()?;
            config.save_to_path(&ctx.paths.config_file)?;
            tracing::info!(weight_kg = config.profile.weight_kg, "profile updated");

            let body = format_profile(&config.profile, ctx.format)?;
            match ctx.format {
                OutputFormat::Pretty => Ok(format!("{}\n\n{body}", "Profile saved".green())),
                OutputFormat::Json => Ok(body),
            }
        }
    }
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
    fn test_set_persists() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        profile(
            &ctx,
            ProfileCommands::Set {
                name: Some("Sam".to_string()),
                weight: Some(64.5),
            },
        )
        .unwrap();

        let saved = Config::load_from_path(&ctx.paths.config_file).unwrap();
        assert_eq!(saved.profile.name.as_deref(), Some("Sam"));
        assert!((saved.profile.weight_kg - 64.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_rejects_bad_weight() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        let result = profile(
            &ctx,
            ProfileCommands::Set {
                name: None,
                weight: Some(-3.0),
            },
        );
        assert!(result.is_err());
        assert!(!ctx.paths.config_file.exists());
    }
}
