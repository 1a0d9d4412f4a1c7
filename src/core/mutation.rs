//! Shared result contract of every mutation

use super::error::MutationError;

/// Where the caller goes after a successful mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// End the request and load the given listing
    Redirect(&'static str),
    /// Stay on the current page
    Stay,
}

impl Navigation {
    pub fn target(&self) -> Option<&'static str> {
        match self {
            Navigation::Redirect(path) => Some(path),
            Navigation::Stay => None,
        }
    }
}

/// A mutation that reached the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// Id of the created, updated or deleted record
    pub id: String,
    /// Message for the user, if any ("Deleted Invoice")
    pub message: Option<String>,
    pub navigation: Navigation,
}

impl Mutation {
    pub fn redirect(id: impl Into<String>, to: &'static str) -> Self {
        Self {
            id: id.into(),
            message: None,
            navigation: Navigation::Redirect(to),
        }
    }

    pub fn stay(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: Some(message.into()),
            navigation: Navigation::Stay,
        }
    }
}

pub type MutationResult = Result<Mutation, MutationError>;
