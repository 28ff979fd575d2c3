//! # Scribe Core
//!
//! Core logic for the medical scribe: the records captured during a consultation and the
//! operations a clinician performs on them.
//!
//! This crate contains:
//! - The record model (transcript, patient profile, health goal, SOAP review) with serde
//!   snapshots in JSON or YAML
//! - EMR text rendering for pasting into an electronic medical record
//! - Merging of pending suggested values into the canonical record
//! - Form editors with save-time validation
//! - `ScribeSession`, the single owner of a consultation's state
//!
//! **No host concerns**: widgets, routing, the OS clipboard and toast rendering belong to the
//! host. The core reaches them only through the [`clipboard::Clipboard`] trait, the
//! [`notice::Notice`] queue and [`session::SaveHooks`].

pub mod clipboard;
pub mod config;
pub mod constants;
pub mod editors;
pub mod emr;
pub mod error;
pub mod model;
pub mod notice;
pub mod sample;
pub mod session;
pub mod snapshot;
pub mod suggestion;
pub mod validation;

pub use config::ScribeConfig;
pub use emr::EmrFormatter;
pub use error::{ScribeError, ScribeResult};
pub use model::{MedicalNote, MedicalScribeData};
pub use session::{CopySection, SaveHooks, ScribeSession, Tab, ViewMode};
pub use suggestion::{Suggestion, SuggestionField};
