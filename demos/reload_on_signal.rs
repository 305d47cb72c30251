// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reload-on-signal example for the cfgpool crate.
//!
//! This example demonstrates:
//! - Registering a destination with the process-wide cache
//! - Reading the destination while the configuration changes
//! - Reloading the configuration with `SIGUSR1`
//!
//! To run this example:
//! ```bash
//! cargo run --example reload_on_signal -- -c tests/testdata/config.test.toml
//!
//! # In another terminal, edit the file and then
//! kill -USR1 <pid printed by the example>
//! ```

use cfgpool::prelude::*;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Something {
    #[serde(default)]
    blaat: String,
    #[serde(default)]
    qwer: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Aaaaa {
    #[serde(default)]
    aa: String,
    #[serde(default)]
    bb: i64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DemoConfig {
    #[serde(default)]
    something: Something,
    #[serde(default)]
    aaaaa: Aaaaa,
}

fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== cfgpool: Reload on Signal ===\n");

    let config: Destination<DemoConfig> = Destination::default();
    cfgpool::add(&config);

    println!("Configuration loaded from {:?}", cfgpool::global().path());
    println!(
        "Send `kill -USR1 {}` to reload (signal bound: {})\n",
        std::process::id(),
        cfgpool::is_reload_bound()
    );

    for _ in 0..30 {
        {
            let current = config.read();
            println!(
                "something.blaat={:?} something.qwer={:?} aaaaa.aa={:?} aaaaa.bb={}",
                current.something.blaat,
                current.something.qwer,
                current.aaaaa.aa,
                current.aaaaa.bb
            );
        }
        thread::sleep(Duration::from_secs(2));
    }
}
