//! # otp-core — Profile Domain
//!
//! The profile record behind the settings screen and the operations the form
//! performs on it. Network persistence lives in `otp-client`; this crate only
//! knows how to read, edit and serialize a profile.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `otp-*` crates.
//! - Option lists are data ([`Catalog`]), never hard-coded.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod profile;
pub mod settings;

pub use error::ProfileError;
pub use profile::{
    discord_avatar_url, InMemoryProfileStore, JsonFileProfileStore, Profile, ProfileField,
    ProfilePayload, ProfileStore,
};
pub use settings::{
    display_name_helper, social_helper, Catalog, SelectOption, SettingsForm, SocialSite,
    SOCIAL_HELPER_MAX_CHARS,
};
