// sf-core/src/units.rs

use uom::si::f64::{
    AmountOfSubstance as UomAmountOfSubstance, MolarConcentration as UomMolarConcentration,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
    Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type Amount = UomAmountOfSubstance;
pub type MolarDensity = UomMolarConcentration;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Volume = UomVolume;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn mol(v: f64) -> Amount {
    use uom::si::amount_of_substance::mole;
    Amount::new::<mole>(v)
}

#[inline]
pub fn mol_per_m3(v: f64) -> MolarDensity {
    use uom::si::molar_concentration::mole_per_cubic_meter;
    MolarDensity::new::<mole_per_cubic_meter>(v)
}

pub mod constants {
    /// Molar gas constant used by the mole solver [J/(mol·K)].
    pub const R_J_PER_MOL_K: f64 = 8.314_459_8;

    /// Standard atmosphere, the reference for gauge pressures [Pa].
    pub const P_ATM_PA: f64 = 101_325.0;

    /// 0 °C in kelvin.
    pub const T_ZERO_C_K: f64 = 273.15;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = pa(101_325.0);
        let _t = k(300.0);
        let _v = m3(1e-3);
        let _n = mol(0.04);
        let _rho = mol_per_m3(40.0);
    }

    #[test]
    fn constructors_store_si_values() {
        assert_eq!(pa(5.0e5).value, 5.0e5);
        assert_eq!(m3(2.5e-5).value, 2.5e-5);
        assert_eq!(mol(0.25).value, 0.25);
        assert_eq!(k(318.0).value, 318.0);
    }
}
