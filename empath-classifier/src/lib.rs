// Copyright (c) 2025-2026 the empath contributors.
// SPDX-License-Identifier: MIT
// See LICENSE in the repository root for full license terms.

//! empath-classifier — the external collaborator that turns chat messages
//! into classified emotional stimuli for the empath engine.
//!
//! The engine core never performs network I/O; everything HTTP-shaped
//! lives here, behind the [`client::Classify`] seam, and every failure
//! mode collapses to a neutral classification.

pub mod content;
pub mod parse;
pub mod client;
pub mod log;

pub use client::{Classification, ClassifierOptions, Classify, HttpClassifier, Provider};
pub use content::{extract_text, Content};
