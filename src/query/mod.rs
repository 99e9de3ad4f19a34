// Copyright 2025-present tfidx contributors
// SPDX-License-Identifier: Apache-2.0

//! Query parsing and the two evaluators: Boolean set algebra and ranked
//! tf-idf scoring.

pub mod boolean;
pub mod parser;
pub mod ranked;
