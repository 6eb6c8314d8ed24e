// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod cli;
pub mod commands;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod month;
pub mod seed;
pub mod store;
pub mod utils;
pub mod validate;
