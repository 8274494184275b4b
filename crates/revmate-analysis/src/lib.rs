//! Review effort estimation and reviewer attribution from git history.
//!
//! Given a head commit and its single parent, this crate computes the size
//! of the change, converts it into suggested review sessions and a minimum
//! reviewer count, and walks first-parent history to attribute each
//! modified file to the developers who most recently touched it.
//!
//! The entry point is [`analyze::analyze`], which sequences the stages:
//! diff stats ([`diffstat`]) → effort arithmetic ([`effort`]) → history
//! walk ([`blame`]) → reviewer ranking ([`rank`]). Repository access goes
//! through the [`repo::RepoBackend`] seam; [`repo::GitBackend`] implements
//! it over git2.

pub mod analyze;
pub mod blame;
pub mod diffstat;
pub mod effort;
pub mod rank;
pub mod repo;

#[cfg(test)]
pub(crate) mod testutil;
