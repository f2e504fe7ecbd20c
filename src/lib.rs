// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod errors;
pub mod forecast;
pub mod ledger;
pub mod models;
pub mod session;
pub mod stats;
pub mod store;
pub mod utils;
