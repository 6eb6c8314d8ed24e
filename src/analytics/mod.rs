// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure selectors over a [`crate::models::FinanceState`] snapshot. Nothing
//! here mutates or caches; every call recomputes from the snapshot it is given.

pub mod aggregate;
pub mod insurance;
pub mod loans;
pub mod networth;
pub mod recurring;
pub mod window;
