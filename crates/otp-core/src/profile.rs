//! # Player Profile
//!
//! The profile record edited by the settings form, the payload sent when it
//! is saved, and the [`ProfileStore`] capability the form reads and writes.
//!
//! ## Wire Format
//!
//! Field names are camelCase on the wire (`displayName`, `mainAtt`,
//! `mainDef`). Picture slots live on the profile but are uploaded through a
//! separate path and never included in [`ProfilePayload`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// A player profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub rank: String,
    /// Social handles keyed by site name.
    #[serde(default)]
    pub socials: BTreeMap<String, String>,
    /// Main attacking operator.
    #[serde(default)]
    pub main_att: String,
    /// Main defending operator.
    #[serde(default)]
    pub main_def: String,
    /// Picture URLs keyed by slot name.
    #[serde(default)]
    pub pics: BTreeMap<String, String>,
}

impl Profile {
    /// The subset of the profile sent on save.
    pub fn payload(&self) -> ProfilePayload {
        ProfilePayload {
            display_name: self.display_name.clone(),
            rank: self.rank.clone(),
            socials: self.socials.clone(),
            main_att: self.main_att.clone(),
            main_def: self.main_def.clone(),
        }
    }
}

/// Body of the profile save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    pub display_name: String,
    pub rank: String,
    pub socials: BTreeMap<String, String>,
    pub main_att: String,
    pub main_def: String,
}

// ─── Field addressing ────────────────────────────────────────────────

/// A single editable profile field.
///
/// Parsed from `display-name`, `rank`, `main-att`, `main-def`,
/// `social:<site>` and `pic:<slot>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProfileField {
    DisplayName,
    Rank,
    MainAtt,
    MainDef,
    Social(String),
    Picture(String),
}

impl ProfileField {
    /// Write `value` into this field of `profile`.
    pub fn apply(&self, profile: &mut Profile, value: &str) {
        let value = value.to_string();
        match self {
            Self::DisplayName => profile.display_name = value,
            Self::Rank => profile.rank = value,
            Self::MainAtt => profile.main_att = value,
            Self::MainDef => profile.main_def = value,
            Self::Social(site) => {
                profile.socials.insert(site.clone(), value);
            }
            Self::Picture(slot) => {
                profile.pics.insert(slot.clone(), value);
            }
        }
    }
}

impl FromStr for ProfileField {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keyed = |prefix: &str| {
            s.strip_prefix(prefix)
                .filter(|key| !key.is_empty())
                .map(str::to_string)
        };
        match s {
            "display-name" => Ok(Self::DisplayName),
            "rank" => Ok(Self::Rank),
            "main-att" => Ok(Self::MainAtt),
            "main-def" => Ok(Self::MainDef),
            _ => keyed("social:")
                .map(Self::Social)
                .or_else(|| keyed("pic:").map(Self::Picture))
                .ok_or_else(|| ProfileError::UnknownField(s.to_string())),
        }
    }
}

impl std::fmt::Display for ProfileField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DisplayName => f.write_str("display-name"),
            Self::Rank => f.write_str("rank"),
            Self::MainAtt => f.write_str("main-att"),
            Self::MainDef => f.write_str("main-def"),
            Self::Social(site) => write!(f, "social:{site}"),
            Self::Picture(slot) => write!(f, "pic:{slot}"),
        }
    }
}

/// CDN URL of a Discord user's avatar image.
pub fn discord_avatar_url(user_id: &str, avatar: &str) -> String {
    format!("https://cdn.discordapp.com/avatars/{user_id}/{avatar}.png")
}

// ─── Stores ──────────────────────────────────────────────────────────

/// Read/write access to the current profile.
pub trait ProfileStore {
    /// The current profile.
    fn load(&self) -> Result<Profile, ProfileError>;
    /// Replace the current profile.
    fn save(&mut self, profile: &Profile) -> Result<(), ProfileError>;
}

/// A profile held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profile: Profile,
}

impl InMemoryProfileStore {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn load(&self) -> Result<Profile, ProfileError> {
        Ok(self.profile.clone())
    }

    fn save(&mut self, profile: &Profile) -> Result<(), ProfileError> {
        self.profile = profile.clone();
        Ok(())
    }
}

/// A profile persisted as a JSON file. A missing file reads as an empty
/// profile.
#[derive(Debug, Clone)]
pub struct JsonFileProfileStore {
    path: PathBuf,
}

impl JsonFileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ProfileError {
        ProfileError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl ProfileStore for JsonFileProfileStore {
    fn load(&self) -> Result<Profile, ProfileError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Profile::default()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&mut self, profile: &Profile) -> Result<(), ProfileError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let bytes = serde_json::to_vec_pretty(profile)?;
        std::fs::write(&self.path, bytes).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), "profile written");
        Ok(())
    }
}
