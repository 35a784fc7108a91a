//! Domain Layer
//!
//! The core of pap - deployment safety rules without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Lock record and lock state
//! - `value_objects/` - Decisions, verdicts and step outcomes
//! - `policies/` - The safety gate
//! - `services/` - Command line builders for rsync and ssh
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never spawns processes or touches files directly
//! 2. **Pure Functions** - Policies are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
