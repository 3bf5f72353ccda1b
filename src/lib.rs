//! Keyway - sync `.env` secrets with a shared vault and deployment providers.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── login         # Device or token login
//! │   ├── logout        # Forget the stored credential
//! │   ├── whoami        # Show the stored identity
//! │   ├── push          # Local file → vault
//! │   ├── pull          # Vault → local file
//! │   ├── diff          # Compare local file and vault
//! │   ├── sync          # Vault ↔ provider
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── codec         # .env parse/serialize
//!     ├── domain/       # SecretSet, Diff, credentials, sync types
//!     ├── merge         # Push/pull merge policies
//!     ├── crypto        # AES-256-GCM credential encryption
//!     ├── store/        # Credential storage
//!     │   ├── mod       # CredentialStore trait
//!     │   ├── key       # Machine key file
//!     │   └── fs        # Encrypted file storage
//!     ├── api/          # Vault API traits and HTTP client
//!     ├── auth          # Device authorization flow
//!     ├── session       # Token resolution and 401 retry
//!     ├── matcher       # Repository → provider project matching
//!     ├── reconcile     # Vault ↔ provider sync planning
//!     ├── git           # Repository detection
//!     └── config        # Settings resolution
//! ```
//!
//! # Features
//!
//! - Non-destructive push and pull by default
//! - Credentials encrypted at rest, self-healing on corruption
//! - Provider sync that is always previewed before it is applied

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::domain::{Diff, SecretSet, StoredCredential, SyncOutcome, SyncPreview};
pub use crate::error::{Error, Result};
