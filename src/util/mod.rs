// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility modules for string processing.
//!
//! Text normalization for accent-insensitive search, and markup stripping
//! for turning post bodies into indexable text.

pub mod html;
pub mod normalize;
