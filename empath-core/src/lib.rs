// Copyright (c) 2025-2026 the empath contributors.
// SPDX-License-Identifier: MIT
// See LICENSE in the repository root for full license terms.

//! empath-core — a persistent affective state engine for conversational
//! agents.
//!
//! The engine maintains a seven-dimensional affect space, six basic
//! emotion levels, an OCEAN personality profile with derived baseline and
//! decay tables, and a set of active ruminations, all persisted as a
//! single crash-safe JSON document.

pub mod emotion;
pub mod personality;
pub mod mapping;
pub mod goals;
pub mod rumination;
pub mod state;
pub mod config;
pub mod error;
pub mod engine;
pub mod persistence;
pub mod awareness;
pub mod presets;

pub use config::EngineConfig;
pub use engine::{EmotionEngine, Snapshot};
pub use error::EngineError;
pub use state::EngineState;
