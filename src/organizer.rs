//! Categorization orchestrator: remote first, local fallback
//!
//! The decision runs as an explicit state machine:
//!
//! ```text
//! Idle ──credential──▶ AttemptingRemote ──ok──────▶ Done
//!   │                        │
//!   └──no credential──▶ FallingBackLocal ◀──error─┘
//!                            │
//!                            └────────────────────▶ Done
//! ```
//!
//! No transition leads back to `AttemptingRemote`, so the remote path runs
//! at most once and the local fallback at most once per call.
use crate::assignment::CategoryAssignment;
use crate::categorize::categorize_local;
use crate::config::OrganizerConfig;
use crate::error::ClassifyError;
use crate::remote::{CompletionClient, categorize_with_ai};
use crate::storage::{Credential, CredentialStore, load_credential};
use crate::tab_data::{TabDescriptor, TabInfo, select_candidates};

/// Which categorizer produced an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    Local,
}

/// A finished categorization
#[derive(Debug, Clone, PartialEq)]
pub struct Organized {
    pub assignment: CategoryAssignment,
    pub source: Source,
    /// Set when the remote attempt failed and the local rules were used
    pub warning: Option<String>,
    pub tab_count: usize,
}

/// Result of one organize call; never an error
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Too few candidate tabs; nothing was categorized
    NothingToDo { candidates: usize },
    Organized(Organized),
}

#[derive(Debug)]
enum State {
    Idle,
    AttemptingRemote(Credential),
    FallingBackLocal(Option<ClassifyError>),
    Done(Organized),
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Idle => "Idle",
            State::AttemptingRemote(_) => "AttemptingRemote",
            State::FallingBackLocal(_) => "FallingBackLocal",
            State::Done(_) => "Done",
        }
    }
}

pub struct Organizer<'a, C, S> {
    client: &'a C,
    store: &'a S,
    config: &'a OrganizerConfig,
}

impl<'a, C: CompletionClient, S: CredentialStore> Organizer<'a, C, S> {
    pub fn new(client: &'a C, store: &'a S, config: &'a OrganizerConfig) -> Self {
        Organizer {
            client,
            store,
            config,
        }
    }

    /// Pick the candidate tabs from the window and categorize them
    pub async fn organize(&self, tabs: &[TabInfo]) -> Outcome {
        let candidates = select_candidates(tabs);
        self.organize_candidates(&candidates).await
    }

    /// Categorize tabs already known to be candidates
    pub async fn organize_candidates(&self, candidates: &[TabDescriptor]) -> Outcome {
        if candidates.len() < self.config.min_candidates {
            log::info!("Only {} candidate tabs, nothing to organize", candidates.len());
            return Outcome::NothingToDo {
                candidates: candidates.len(),
            };
        }

        let mut state = State::Idle;
        loop {
            let next = match state {
                State::Idle => match load_credential(self.store, self.config.min_credential_len).await {
                    Some(credential) => State::AttemptingRemote(credential),
                    None => State::FallingBackLocal(None),
                },
                State::AttemptingRemote(credential) => {
                    match categorize_with_ai(self.client, candidates, &credential, self.config).await {
                        Ok(assignment) => State::Done(Organized {
                            assignment,
                            source: Source::Remote,
                            warning: None,
                            tab_count: candidates.len(),
                        }),
                        Err(e) => {
                            log::error!("Remote grouping failed, falling back to local: {}", e);
                            State::FallingBackLocal(Some(e))
                        }
                    }
                }
                State::FallingBackLocal(reason) => State::Done(Organized {
                    assignment: categorize_local(candidates),
                    source: Source::Local,
                    warning: reason.map(|e| e.to_string()),
                    tab_count: candidates.len(),
                }),
                State::Done(organized) => {
                    log::info!(
                        "Organized {} tabs into {} groups ({:?})",
                        organized.tab_count,
                        organized.assignment.len(),
                        organized.source
                    );
                    return Outcome::Organized(organized);
                }
            };
            log::debug!("Organizer -> {}", next.name());
            state = next;
        }
    }
}
