//! # Settings Form
//!
//! Edit operations and display rules of the profile settings screen. The
//! form holds no state of its own; every edit is a read-modify-write against
//! its [`ProfileStore`].
//!
//! Option lists (ranks, operators, social sites) are data, loaded from a
//! [`Catalog`] and iterated in order.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::profile::{Profile, ProfileField, ProfilePayload, ProfileStore};

/// Longest social helper text shown before truncation, in characters.
pub const SOCIAL_HELPER_MAX_CHARS: usize = 25;

// ─── Catalog ─────────────────────────────────────────────────────────

/// One entry of a select list: a rank or an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Rank or operator name; this is also the stored value.
    #[serde(alias = "rank", alias = "operator")]
    pub label: String,
    /// Icon shown beside the label.
    #[serde(default)]
    pub img: String,
}

/// A social site with a text input on the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSite {
    /// Key into [`Profile::socials`].
    pub site: String,
    #[serde(default)]
    pub img: String,
    /// Profile URL prefix the handle is appended to.
    pub url: String,
}

/// The option lists the settings form renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub ranks: Vec<SelectOption>,
    pub attackers: Vec<SelectOption>,
    pub defenders: Vec<SelectOption>,
    pub socials: Vec<SocialSite>,
}

impl Catalog {
    /// Social inputs split into two columns: the first half (rounded down)
    /// and the remainder.
    pub fn social_columns(&self) -> (&[SocialSite], &[SocialSite]) {
        self.socials.split_at(self.socials.len() / 2)
    }

    /// The select list behind `field`, if the field is a select.
    pub fn options_for(&self, field: &ProfileField) -> Option<&[SelectOption]> {
        match field {
            ProfileField::Rank => Some(self.ranks.as_slice()),
            ProfileField::MainAtt => Some(self.attackers.as_slice()),
            ProfileField::MainDef => Some(self.defenders.as_slice()),
            _ => None,
        }
    }

    /// Check `value` against the select list behind `field`. Free-text
    /// fields accept anything.
    pub fn validate(&self, field: &ProfileField, value: &str) -> Result<(), ProfileError> {
        match self.options_for(field) {
            Some(options) if !options.iter().any(|o| o.label == value) => {
                Err(ProfileError::UnknownOption {
                    field: field.to_string(),
                    value: value.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

// ─── Display rules ───────────────────────────────────────────────────

/// Helper text under the display-name input.
pub fn display_name_helper(display_name: &str) -> String {
    format!("Hi my name is ...{display_name}")
}

/// Helper text under a social input: the full profile URL, truncated to
/// [`SOCIAL_HELPER_MAX_CHARS`] characters plus `...` when longer.
pub fn social_helper(url_prefix: &str, handle: &str) -> String {
    let full = format!("{url_prefix}{handle}");
    if full.chars().count() > SOCIAL_HELPER_MAX_CHARS {
        let head: String = full.chars().take(SOCIAL_HELPER_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        full
    }
}

// ─── The form ────────────────────────────────────────────────────────

/// The settings form over a profile store.
#[derive(Debug)]
pub struct SettingsForm<S> {
    store: S,
}

impl<S: ProfileStore> SettingsForm<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn profile(&self) -> Result<Profile, ProfileError> {
        self.store.load()
    }

    /// Set one field and persist the result.
    pub fn set(&mut self, field: &ProfileField, value: &str) -> Result<Profile, ProfileError> {
        let mut profile = self.store.load()?;
        field.apply(&mut profile, value);
        self.store.save(&profile)?;
        tracing::debug!(%field, "profile field updated");
        Ok(profile)
    }

    pub fn set_display_name(&mut self, value: &str) -> Result<Profile, ProfileError> {
        self.set(&ProfileField::DisplayName, value)
    }

    pub fn set_rank(&mut self, value: &str) -> Result<Profile, ProfileError> {
        self.set(&ProfileField::Rank, value)
    }

    pub fn set_social(&mut self, site: &str, handle: &str) -> Result<Profile, ProfileError> {
        self.set(&ProfileField::Social(site.to_string()), handle)
    }

    pub fn set_main_att(&mut self, value: &str) -> Result<Profile, ProfileError> {
        self.set(&ProfileField::MainAtt, value)
    }

    pub fn set_main_def(&mut self, value: &str) -> Result<Profile, ProfileError> {
        self.set(&ProfileField::MainDef, value)
    }

    pub fn set_picture(&mut self, slot: &str, url: &str) -> Result<Profile, ProfileError> {
        self.set(&ProfileField::Picture(slot.to_string()), url)
    }

    /// The body to send when the user presses save.
    pub fn payload(&self) -> Result<ProfilePayload, ProfileError> {
        Ok(self.store.load()?.payload())
    }

    /// Helper text for every catalog social site, in catalog order.
    ///
    /// Sites with no stored handle show the bare URL prefix.
    pub fn social_helpers(&self, catalog: &Catalog) -> Result<Vec<(String, String)>, ProfileError> {
        let profile = self.store.load()?;
        Ok(catalog
            .socials
            .iter()
            .map(|s| {
                let handle = profile.socials.get(&s.site).map(String::as_str).unwrap_or("");
                (s.site.clone(), social_helper(&s.url, handle))
            })
            .collect())
    }

    /// Set `field` after checking the value against the catalog.
    pub fn set_checked(
        &mut self,
        catalog: &Catalog,
        field: &ProfileField,
        value: &str,
    ) -> Result<Profile, ProfileError> {
        catalog.validate(field, value)?;
        self.set(field, value)
    }

    /// Each select list with its options, marking the one the profile holds.
    pub fn select_lists<'c>(
        &self,
        catalog: &'c Catalog,
    ) -> Result<Vec<(ProfileField, Vec<(&'c SelectOption, bool)>)>, ProfileError> {
        let profile = self.store.load()?;
        Ok([
            (ProfileField::Rank, &profile.rank),
            (ProfileField::MainAtt, &profile.main_att),
            (ProfileField::MainDef, &profile.main_def),
        ]
        .into_iter()
        .map(|(field, current)| {
            let options = catalog
                .options_for(&field)
                .unwrap_or_default()
                .iter()
                .map(|o| (o, o.label == *current))
                .collect();
            (field, options)
        })
        .collect())
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
