//! Stepping behavior of the pawl and notch mechanism.

mod common;

use std::sync::Arc;

use common::{default_config, four_slot_config};
use enigma::{Alphabet, Machine, Permutation, Rotor, RotorCatalog};

/// Settings of slots 1.. as indices.
fn settings(machine: &Machine) -> Vec<usize> {
    machine.installed()[1..].iter().map(|r| r.setting()).collect()
}

#[test]
fn middle_rotor_double_steps() {
    let mut machine = four_slot_config().build_machine().unwrap();
    machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    machine.set_rotors("ADU").unwrap();

    let mut seen = Vec::new();
    for _ in 0..4 {
        machine.step();
        seen.push(machine.positions());
    }
    assert_eq!(seen, ["ADV", "AEW", "BFX", "BFY"]);
}

#[test]
fn left_rotor_steps_once_per_middle_notch() {
    let mut machine = four_slot_config().build_machine().unwrap();
    machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
    machine.set_rotors("AAA").unwrap();

    let steps = 26 * 26 * 26;
    let mut moves = [0usize; 3];
    for _ in 0..steps {
        let before = settings(&machine);
        machine.step();
        let after = settings(&machine);
        for (i, count) in moves.iter_mut().enumerate() {
            if before[i] != after[i] {
                *count += 1;
            }
        }
    }
    let [left, middle, right] = moves;
    assert_eq!(right, steps);
    // One carry per right-rotor revolution, plus one extra step each time
    // the middle rotor carries into the left rotor.
    assert_eq!(middle, right / 26 + left);
    assert_eq!(left, 27);
    assert_eq!(machine.positions(), "BBA");
}

#[test]
fn two_pawls_one_full_revolution() {
    let config = default_config();
    let mut machine = Machine::new(
        Arc::clone(config.alphabet()),
        3,
        2,
        Arc::clone(config.catalog()),
    )
    .unwrap();
    machine.insert_rotors(&["B", "I", "III"]).unwrap();
    machine.set_rotors("AA").unwrap();

    let cipher = machine.convert_message(&"A".repeat(26)).unwrap();
    assert_eq!(cipher.len(), 26);
    // Right rotor is back where it started; the left one carried exactly once.
    assert_eq!(machine.positions(), "BA");
}

#[test]
fn rotors_without_pawls_stay_put() {
    let config = default_config();
    let mut machine = Machine::new(
        Arc::clone(config.alphabet()),
        5,
        1,
        Arc::clone(config.catalog()),
    )
    .unwrap();
    machine.insert_rotors(&["B", "Beta", "I", "II", "III"]).unwrap();
    machine.set_rotors("AQEV").unwrap();
    for _ in 0..52 {
        machine.step();
    }
    assert_eq!(machine.positions(), "AQEV");
}

#[test]
fn multiple_notches_carry_twice_per_revolution() {
    let alphabet = Arc::new(Alphabet::default());
    let wiring = || Permutation::identity(Arc::clone(&alphabet));
    let catalog: RotorCatalog = vec![
        Rotor::reflector("R", Permutation::new("(AB)(CD)", Arc::clone(&alphabet)).unwrap()),
        Rotor::moving("L", wiring(), "").unwrap(),
        Rotor::moving("F", wiring(), "ZM").unwrap(),
    ]
    .into_iter()
    .collect();
    let mut machine = Machine::new(Arc::clone(&alphabet), 3, 2, Arc::new(catalog)).unwrap();
    machine.insert_rotors(&["R", "L", "F"]).unwrap();
    for _ in 0..26 {
        machine.step();
    }
    assert_eq!(machine.positions(), "CA");
}

#[test]
fn small_alphabet_wraps() {
    let alphabet = Arc::new(Alphabet::new("ABCD").unwrap());
    let catalog: RotorCatalog = vec![
        Rotor::reflector("R", Permutation::new("(AC)(BD)", Arc::clone(&alphabet)).unwrap()),
        Rotor::moving("M", Permutation::new("(ABCD)", Arc::clone(&alphabet)).unwrap(), "D")
            .unwrap(),
        Rotor::moving("F", Permutation::new("(AB)", Arc::clone(&alphabet)).unwrap(), "B")
            .unwrap(),
    ]
    .into_iter()
    .collect();
    let mut machine = Machine::new(Arc::clone(&alphabet), 3, 2, Arc::new(catalog)).unwrap();
    machine.insert_rotors(&["R", "M", "F"]).unwrap();
    machine.set_rotors("AA").unwrap();

    let mut seen = Vec::new();
    for _ in 0..6 {
        machine.step();
        seen.push(machine.positions());
    }
    assert_eq!(seen, ["AB", "BC", "BD", "BA", "BB", "CC"]);

    let mut encoder = machine.clone();
    let cipher = encoder.convert_message("ABCDDCBA").unwrap();
    assert_eq!(machine.convert_message(&cipher).unwrap(), "ABCDDCBA");
}
