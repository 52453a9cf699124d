// Copyright 2022-2023 VMware, Inc.
// SPDX-License-Identifier: BSD-2-Clause

//! Command-line frontend for the Prover9 and Mace4 tools.

use clap::Parser;
use logic_tools::App;

fn main() {
    pretty_env_logger::init();
    App::parse().exec()
}
