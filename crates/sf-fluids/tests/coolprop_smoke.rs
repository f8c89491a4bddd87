//! CoolProp integration tests.
//!
//! These tests verify that the CoolProp backend returns plausible values for the gases used
//! on sorption rigs. Tolerances are broad to avoid backend version issues, but physical
//! plausibility is enforced.

use sf_core::units::{k, pa};
use sf_fluids::{CoolPropProvider, Gas, GasPropertyProvider, TabulatedProvider};

#[test]
fn methane_critical_point_matches_table() {
    let coolprop = CoolPropProvider::new();
    let table = TabulatedProvider::new();

    let tc = coolprop.critical_temperature(Gas::Methane).unwrap();
    let tc_ref = table.critical_temperature(Gas::Methane).unwrap();
    assert!((tc.value - tc_ref.value).abs() < 0.5, "Tc = {} K", tc.value);

    let pc = coolprop.critical_pressure(Gas::Methane).unwrap();
    let pc_ref = table.critical_pressure(Gas::Methane).unwrap();
    assert!(
        (pc.value - pc_ref.value).abs() / pc_ref.value < 0.01,
        "Pc = {} Pa",
        pc.value
    );
}

#[test]
fn acentric_factors_are_plausible() {
    let provider = CoolPropProvider::new();
    let omega_ch4 = provider.acentric_factor(Gas::Methane).unwrap();
    let omega_co2 = provider.acentric_factor(Gas::CarbonDioxide).unwrap();
    assert!(omega_ch4 > 0.0 && omega_ch4 < 0.05, "omega = {omega_ch4}");
    assert!(omega_co2 > 0.2 && omega_co2 < 0.25, "omega = {omega_co2}");
}

#[test]
fn helium_is_nearly_ideal_at_ambient() {
    let provider = CoolPropProvider::new();
    let z = provider
        .compressibility_factor(pa(101_325.0), k(298.15), Gas::Helium)
        .unwrap();
    assert!((z - 1.0).abs() < 0.01, "Z = {z}");
}

#[test]
fn methane_compressibility_drops_with_pressure() {
    let provider = CoolPropProvider::new();
    let t = k(318.0);

    let z1 = provider
        .compressibility_factor(pa(1.0e5), t, Gas::Methane)
        .unwrap();
    let z2 = provider
        .compressibility_factor(pa(5.0e6), t, Gas::Methane)
        .unwrap();
    let z3 = provider
        .compressibility_factor(pa(1.0e7), t, Gas::Methane)
        .unwrap();

    assert!(z1 > z2 && z2 > z3, "Z = {z1}, {z2}, {z3}");
    assert!(z3 > 0.7, "Z = {z3}");
}

#[test]
fn nitrogen_normal_boiling_point() {
    let provider = CoolPropProvider::new();
    let tb = provider.normal_boiling_temperature(Gas::Nitrogen).unwrap();
    assert!((tb.value - 77.35).abs() < 0.5, "Tb = {} K", tb.value);
}
