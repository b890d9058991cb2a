//! # Login / Logout Subcommands
//!
//! Manage the session token sent with every API request.

use anyhow::{bail, Context, Result};
use clap::Args;

use otp_client::{CredentialStore, Token};

/// Arguments for the `otp login` subcommand.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Session token issued by the sign-in flow.
    #[arg(long)]
    pub token: String,
}

/// Execute the login subcommand.
pub fn run_login(args: &LoginArgs, store: &dyn CredentialStore) -> Result<u8> {
    let token = args.token.trim();
    if token.is_empty() {
        bail!("token must not be empty");
    }
    store
        .set(Token::new(token))
        .context("failed to store session token")?;
    tracing::info!("session token stored");
    println!("Signed in.");
    Ok(0)
}

/// Execute the logout subcommand. Succeeds when already signed out.
pub fn run_logout(store: &dyn CredentialStore) -> Result<u8> {
    store.clear().context("failed to remove session token")?;
    tracing::info!("session token removed");
    println!("Signed out.");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use otp_client::FileCredentialStore;

    #[test]
    fn login_then_logout() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("token.json"));

        let args = LoginArgs {
            token: "  abc \n".into(),
        };
        assert_eq!(run_login(&args, &store).unwrap(), 0);
        assert_eq!(store.get().unwrap().unwrap().expose(), "abc");

        assert_eq!(run_logout(&store).unwrap(), 0);
        assert!(store.get().unwrap().is_none());
        assert_eq!(run_logout(&store).unwrap(), 0);
    }

    #[test]
    fn login_rejects_blank_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("token.json"));
        let args = LoginArgs { token: "   ".into() };
        assert!(run_login(&args, &store).is_err());
        assert!(!store.path().exists());
    }
}
