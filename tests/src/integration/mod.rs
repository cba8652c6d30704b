//! Cross-crate integration tests.

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod catalog;
#[cfg(all(test, unix))]
mod e2e_provisioning;
#[cfg(test)]
mod flows;
