//! Shared test harness modules for the Sipwise CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;
use camino::Utf8PathBuf;

mod helpers;
