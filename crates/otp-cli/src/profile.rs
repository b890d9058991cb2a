//! # Profile Subcommand
//!
//! Edit the locally stored profile the way the settings screen does, and
//! save it to the API.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use otp_client::{OtpClient, SaveOutcome};
use otp_core::{
    display_name_helper, Catalog, JsonFileProfileStore, ProfileField, ProfileStore, SettingsForm,
};

/// Arguments for the `otp profile` subcommand.
#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Profile file. Defaults to `OTP_PROFILE_PATH`, then `profile.json`
    /// beside the token file.
    #[arg(long)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Print the profile with its helper text.
    Show {
        /// JSON catalog of ranks, operators and social sites.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Set one field: display-name, rank, main-att, main-def,
    /// social:<site> or pic:<slot>.
    Set {
        field: ProfileField,
        value: String,
        /// Reject rank and operator values this catalog does not offer.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Send the profile to the API.
    Save,
}

/// Where the profile lives when `--file` is not given.
pub fn default_profile_path() -> PathBuf {
    std::env::var_os("OTP_PROFILE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| otp_client::token_path_from_env().with_file_name("profile.json"))
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read catalog: {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse catalog: {}", path.display()))
}

/// Text printed by `otp profile show`.
pub fn render_profile<S: ProfileStore>(
    form: &SettingsForm<S>,
    catalog: Option<&Catalog>,
) -> Result<String> {
    let profile = form.profile()?;
    let mut out = String::new();

    writeln!(out, "Display name: {}", profile.display_name)?;
    writeln!(out, "  {}", display_name_helper(&profile.display_name))?;
    writeln!(out, "Rank:         {}", profile.rank)?;
    writeln!(out, "Main attack:  {}", profile.main_att)?;
    writeln!(out, "Main defense: {}", profile.main_def)?;

    if let Some(catalog) = catalog {
        for (field, options) in form.select_lists(catalog)? {
            writeln!(out, "Options for {field}:")?;
            for (option, selected) in options {
                let marker = if selected { '*' } else { ' ' };
                writeln!(out, "  {marker} {:<12} {}", option.label, option.img)?;
            }
        }
    }

    match catalog {
        Some(catalog) => {
            let helpers = form.social_helpers(catalog)?;
            let (left, right) = catalog.social_columns();
            for (column, sites) in [left, right].into_iter().enumerate() {
                writeln!(out, "Socials (column {}):", column + 1)?;
                for site in sites {
                    let helper = helpers
                        .iter()
                        .find(|(name, _)| *name == site.site)
                        .map(|(_, text)| text.as_str())
                        .unwrap_or_default();
                    writeln!(out, "  {:<10} {helper}", site.site)?;
                }
            }
        }
        None => {
            writeln!(out, "Socials:")?;
            for (site, handle) in &profile.socials {
                writeln!(out, "  {site:<10} {handle}")?;
            }
        }
    }

    if !profile.pics.is_empty() {
        writeln!(out, "Pictures:")?;
        for (slot, url) in &profile.pics {
            writeln!(out, "  {slot:<10} {url}")?;
        }
    }

    Ok(out)
}

/// Send the form to the API.
///
/// Returns exit code: 0 when saved, 1 when the session has expired, 2 when
/// the server rejected the save.
pub async fn save<S: ProfileStore>(form: &SettingsForm<S>, client: &OtpClient) -> Result<u8> {
    match client
        .submit_settings(form)
        .await
        .context("failed to save profile")?
    {
        SaveOutcome::Saved(_) => {
            println!("Profile saved.");
            Ok(0)
        }
        SaveOutcome::Rejected { status, body } => {
            eprintln!("Profile not saved: server answered {status}.");
            eprintln!("{}", crate::fetch::render_body(body).await?);
            Ok(2)
        }
        SaveOutcome::ReauthRequired => {
            eprintln!("Session expired. Run `otp login` and try again.");
            Ok(1)
        }
    }
}

/// Execute the profile subcommand.
pub async fn run_profile(args: &ProfileArgs) -> Result<u8> {
    let path = args.file.clone().unwrap_or_else(default_profile_path);
    tracing::debug!(path = %path.display(), "using profile file");
    let mut form = SettingsForm::new(JsonFileProfileStore::new(path));

    match &args.command {
        ProfileCommand::Show { catalog } => {
            let catalog = catalog.as_deref().map(load_catalog).transpose()?;
            print!("{}", render_profile(&form, catalog.as_ref())?);
            Ok(0)
        }
        ProfileCommand::Set {
            field,
            value,
            catalog,
        } => {
            let updated = match catalog.as_deref().map(load_catalog).transpose()? {
                Some(catalog) => form.set_checked(&catalog, field, value),
                None => form.set(field, value),
            };
            updated.with_context(|| format!("failed to update {field}"))?;
            println!("{field} = {value}");
            Ok(0)
        }
        ProfileCommand::Save => {
            let client = crate::client_from_env()?;
            save(&form, &client).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use otp_core::InMemoryProfileStore;

    fn catalog() -> Catalog {
        serde_json::from_value(serde_json::json!({
            "ranks": [
                {"rank": "Gold", "img": "gold.png"},
                {"rank": "Diamond", "img": "diamond.png"}
            ],
            "attackers": [{"operator": "Thermite", "img": "thermite.png"}],
            "defenders": [{"operator": "Jager", "img": "jager.png"}],
            "socials": [
                {"site": "twitter", "url": "https://twitter.com/"},
                {"site": "twitch", "url": "https://twitch.tv/"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn show_without_catalog_lists_stored_socials() {
        let mut form = SettingsForm::new(InMemoryProfileStore::default());
        form.set_display_name("Ash").unwrap();
        form.set_social("twitch", "ashplays").unwrap();

        let text = render_profile(&form, None).unwrap();
        assert!(text.contains("Display name: Ash"));
        assert!(text.contains("Hi my name is ...Ash"));
        assert!(text.contains("twitch     ashplays"));
        assert!(!text.contains("Pictures:"));
    }

    #[test]
    fn show_with_catalog_renders_columns_and_helpers() {
        let mut form = SettingsForm::new(InMemoryProfileStore::default());
        form.set_social("twitch", "averyveryverylongname").unwrap();
        form.set_picture("banner", "https://img/b.png").unwrap();

        let text = render_profile(&form, Some(&catalog())).unwrap();
        let col1 = text.find("Socials (column 1):").unwrap();
        let col2 = text.find("Socials (column 2):").unwrap();
        let twitter = text.find("https://twitter.com/").unwrap();
        let twitch = text.find("https://twitch.tv/averyve...").unwrap();
        assert!(col1 < twitter && twitter < col2 && col2 < twitch);
        assert!(text.contains("banner     https://img/b.png"));
    }

    #[test]
    fn show_with_catalog_marks_selected_options() {
        let mut form = SettingsForm::new(InMemoryProfileStore::default());
        form.set_rank("Diamond").unwrap();
        form.set_main_def("Jager").unwrap();

        let text = render_profile(&form, Some(&catalog())).unwrap();
        assert!(text.contains("Options for rank:"));
        assert!(text.contains("    Gold         gold.png"));
        assert!(text.contains("  * Diamond      diamond.png"));
        assert!(text.contains("    Thermite     thermite.png"));
        assert!(text.contains("  * Jager        jager.png"));
        assert!(text.find("Options for main-att:") < text.find("Options for main-def:"));
    }

    #[tokio::test]
    async fn set_with_catalog_rejects_unknown_rank() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("profile.json");
        let catalog_path = dir.path().join("catalog.json");
        std::fs::write(&catalog_path, serde_json::to_vec(&catalog()).unwrap()).unwrap();

        let set = |value: &str| ProfileArgs {
            file: Some(file.clone()),
            command: ProfileCommand::Set {
                field: ProfileField::Rank,
                value: value.into(),
                catalog: Some(catalog_path.clone()),
            },
        };

        assert!(run_profile(&set("Platinum")).await.is_err());
        assert!(!file.exists());

        assert_eq!(run_profile(&set("Gold")).await.unwrap(), 0);
        let stored = JsonFileProfileStore::new(&file).load().unwrap();
        assert_eq!(stored.rank, "Gold");
    }

    #[test]
    fn catalog_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, serde_json::to_vec(&catalog()).unwrap()).unwrap();
        assert_eq!(load_catalog(&path).unwrap(), catalog());
        assert!(load_catalog(&dir.path().join("missing.json")).is_err());
    }

    #[tokio::test]
    async fn set_writes_profile_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("profile.json");
        let args = ProfileArgs {
            file: Some(file.clone()),
            command: ProfileCommand::Set {
                field: "social:twitch".parse().unwrap(),
                value: "ashplays".into(),
                catalog: None,
            },
        };
        assert_eq!(run_profile(&args).await.unwrap(), 0);

        let stored = JsonFileProfileStore::new(file).load().unwrap();
        assert_eq!(stored.socials["twitch"], "ashplays");
    }
}
