//! Octocrab client construction

use octocrab::Octocrab;

use super::errors::GitHubError;

/// Build an authenticated client from the `token` input.
pub fn build_client(token: &str) -> Result<Octocrab, GitHubError> {
    let octocrab = Octocrab::builder()
        .personal_token(token.to_string())
        .build()?;
    Ok(octocrab)
}
