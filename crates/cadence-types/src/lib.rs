//! Core types for the Cadence session core.
//!
//! This crate provides the foundational identifier and contract types for
//! Cadence, a tick-driven orchestration core for round-based session logic
//! (minigame rounds, lobby countdowns, staged match flows).
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Host SDK Layer                          │
//! │  (External, SemVer stable, safe to depend on)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  cadence-types  : ID types, ErrorCode, Reusable  ◄── HERE    │
//! │  cadence-event  : Notification, EventBus                     │
//! │  cadence-module : Module trait, registry, SessionContext     │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Runtime Layer                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  cadence-runtime : Phase, FlowManager, Session               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Identifier Design
//!
//! Participant-facing identifiers ([`SessionId`], [`ParticipantId`],
//! [`SubscriberId`]) are UUID-based:
//!
//! - **Host neutrality**: the core never inspects what a participant is,
//!   only whether two identifiers are equal
//! - **Multi-session safety**: two sessions in one process can never
//!   produce colliding identifiers
//! - **Serialization**: first-class serde support
//!
//! Capability identity ([`ModuleKey`]) is deliberately *not* UUID-based:
//! each capability kind declares a constant key, so "is this capability
//! installed" is a value comparison rather than runtime type introspection.
//!
//! # Example
//!
//! ```
//! use cadence_types::{ModuleKey, SessionId};
//!
//! let session = SessionId::new();
//! let key = ModuleKey::builtin("flow-tick");
//!
//! assert!(key.is_builtin());
//! assert_eq!(key.fqn(), "builtin::flow-tick");
//! println!("{session} runs {key}");
//! ```

mod artifact;
mod error;
mod id;
pub mod tick;

pub use artifact::Reusable;
pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{ModuleKey, ParticipantId, SessionId, SubscriberId};
