// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketledger::repo::settings;
use pocketledger::{Decline, Outcome, Store};
use tempfile::TempDir;

fn setup() -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let store = Store::open_or_init(dir.path().join("ledger.sqlite")).unwrap();
    (dir, store)
}

#[test]
fn theme_defaults_to_light() {
    let (_dir, store) = setup();
    assert_eq!(settings::theme(&store), "light");
}

#[test]
fn missing_key_returns_default() {
    let (_dir, store) = setup();
    assert_eq!(settings::get(&store, "currency", "EUR"), "EUR");
}

#[test]
fn set_overwrites_previous_value() {
    let (_dir, store) = setup();
    settings::set(&store, "currency", "USD").unwrap();
    settings::set(&store, "currency", "INR").unwrap();
    assert_eq!(settings::get(&store, "currency", "EUR"), "INR");
}

#[test]
fn theme_accepts_only_known_values() {
    let (_dir, store) = setup();
    assert_eq!(settings::set_theme(&store, " Dark ").unwrap(), Outcome::Done(()));
    assert_eq!(settings::theme(&store), "dark");
    assert_eq!(
        settings::set_theme(&store, "solarized").unwrap(),
        Outcome::Declined(Decline::InvalidTheme)
    );
    assert_eq!(settings::theme(&store), "dark");
}

#[test]
fn unreadable_store_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    // Never initialized: the settings table does not exist.
    let store = Store::new(dir.path().join("blank.sqlite"));
    assert_eq!(settings::get(&store, "theme", "light"), "light");
}
