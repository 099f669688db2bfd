//! Parameter Sets
//!
//! Scattering models are instantiated once from a `ParamSet`. The set holds
//! named, typed values and remembers which of them were read so that
//! misspelled or unsupported parameters can be reported after construction.

use crate::common::*;
use crate::spectrum::*;
use std::collections::HashMap;
use std::fmt;

mod paramset_item;

// Re-export
pub use paramset_item::*;

/// A hashmap of parameter sets stored by name.
pub type ParamSetMap<T> = HashMap<String, ParamSetItem<T>>;

/// Name of the string parameter holding the identifier of the instance.
pub const ID_PARAM: &str = "id";

/// Stores parameter set items of different types in hashmaps.
#[derive(Clone, Default)]
pub struct ParamSet {
    pub floats: ParamSetMap<Float>,
    pub spectra: ParamSetMap<Spectrum>,
    pub strings: ParamSetMap<String>,
}

/// Define a macro that can be used to generate a function for adding/replacing
/// parameter set item.
macro_rules! paramset_add {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&mut self, name: &str, values: &[$t]) {
            self.$paramset
                .insert(String::from(name), ParamSetItem::new(values.to_vec()));
        }
    };
}

/// Define a macro that can be used to generate a function for finding
/// parameter set item that is stored as a single item.
macro_rules! paramset_find_one {
    ($func: ident, $t: ty, $paramset: ident) => {
        pub fn $func(&self, name: &str, default: $t) -> $t {
            match self.$paramset.get(name) {
                Some(param) if param.values.len() == 1 => {
                    param.looked_up.set(true);
                    param.values[0].clone()
                }
                Some(param) => {
                    warn!(
                        "Parameter '{}' has {} values where 1 was expected. Using default.",
                        name,
                        param.values.len()
                    );
                    param.looked_up.set(true);
                    default
                }
                None => default,
            }
        }
    };
}

/// Define a macro that logs every parameter of a map that was never read.
macro_rules! report_unused {
    ($params: expr, $param_type: literal) => {
        for (name, param) in $params.iter() {
            if !param.looked_up.get() {
                warn!("Parameter \"{} {}\" not used", $param_type, name);
            }
        }
    };
}

/// Define a macro that can be used to print parameter set items.
macro_rules! display_param {
    ($params: expr, $param_type: literal, $formatter: expr) => {
        for (name, param) in $params.iter() {
            writeln!($formatter, "\"{} {}\" {}", $param_type, name, param)?;
        }
    };
}

impl ParamSet {
    /// Returns a new `ParamSet`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new `ParamSet` carrying only an identifier.
    ///
    /// * `id` - The identifier.
    pub fn with_id(id: &str) -> Self {
        let mut ps = Self::new();
        ps.add_string(ID_PARAM, &[String::from(id)]);
        ps
    }

    paramset_find_one!(find_one_float, Float, floats);
    paramset_add!(add_float, Float, floats);

    paramset_find_one!(find_one_string, String, strings);
    paramset_add!(add_string, String, strings);

    paramset_find_one!(find_one_spectrum, Spectrum, spectra);

    /// Add/replace an RGB spectrum.
    ///
    /// * `name`   - Parameter name.
    /// * `values` - RGB values in a linear slice.
    pub fn add_rgb_spectrum(&mut self, name: &str, values: &[Float]) {
        let n = values.len();
        assert!(n % 3 == 0, "RGB spectrum values % 3 != 0");

        self.spectra.insert(
            String::from(name),
            ParamSetItem::new(
                values
                    .chunks_exact(3)
                    .map(|c| Spectrum::from_rgb(c[0], c[1], c[2]))
                    .collect(),
            ),
        );
    }

    /// Returns the identifier of the instance being configured or an empty
    /// string if none was given.
    pub fn id(&self) -> String {
        self.find_one_string(ID_PARAM, String::new())
    }

    /// Reads a float and clamps it to `[low, high]`, logging a warning when
    /// the given value had to be adjusted.
    ///
    /// * `name`    - Parameter name.
    /// * `default` - Value used when the parameter is missing.
    /// * `low`     - Lower bound.
    /// * `high`    - Upper bound.
    pub fn find_one_float_clamped(&self, name: &str, default: Float, low: Float, high: Float) -> Float {
        let v = self.find_one_float(name, default);
        if v.is_nan() {
            warn!("Parameter '{}' is NaN. Using default {}.", name, default);
            return default;
        }
        let c = clamp(v, low, high);
        if c != v {
            warn!("Parameter '{}' = {} outside [{}, {}]. Clamped to {}.", name, v, low, high, c);
        }
        c
    }

    /// Logs a warning for every parameter that was never looked up.
    pub fn report_unused(&self) {
        report_unused!(self.floats, "float");
        report_unused!(self.spectra, "spectrum");
        report_unused!(self.strings, "string");
    }

    /// Returns the names of every parameter that was never looked up.
    pub fn unused(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .floats
            .iter()
            .filter(|(_, p)| !p.looked_up.get())
            .map(|(n, _)| n.clone())
            .chain(self.spectra.iter().filter(|(_, p)| !p.looked_up.get()).map(|(n, _)| n.clone()))
            .chain(self.strings.iter().filter(|(_, p)| !p.looked_up.get()).map(|(n, _)| n.clone()))
            .collect();
        names.sort();
        names
    }
}

impl fmt::Display for ParamSet {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_param!(self.floats, "float", f);
        display_param!(self.spectra, "spectrum", f);
        display_param!(self.strings, "string", f);
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_one_with_default() {
        let mut ps = ParamSet::new();
        ps.add_float("exponent", &[10.0]);
        assert_eq!(ps.find_one_float("exponent", 1.0), 10.0);
        assert_eq!(ps.find_one_float("missing", 1.0), 1.0);
    }

    #[test]
    fn find_one_with_multiple_values_uses_default() {
        let mut ps = ParamSet::new();
        ps.add_float("exponent", &[10.0, 20.0]);
        assert_eq!(ps.find_one_float("exponent", 1.0), 1.0);
        assert!(ps.unused().is_empty());
    }

    #[test]
    fn rgb_spectrum() {
        let mut ps = ParamSet::new();
        ps.add_rgb_spectrum("reflectance", &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let spectra = &ps.spectra["reflectance"].values;
        assert_eq!(spectra.len(), 2);
        assert_eq!(spectra[1], Spectrum::from_rgb(0.4, 0.5, 0.6));

        // A list cannot be read back as a single value.
        assert_eq!(ps.find_one_spectrum("reflectance", Spectrum::ZERO), Spectrum::ZERO);
    }

    #[test]
    #[should_panic]
    fn rgb_spectrum_wrong_length() {
        let mut ps = ParamSet::new();
        ps.add_rgb_spectrum("reflectance", &[0.1, 0.2]);
    }

    #[test]
    fn id_defaults_to_empty() {
        assert_eq!(ParamSet::new().id(), "");
        assert_eq!(ParamSet::with_id("floor").id(), "floor");
    }

    #[test]
    fn tracks_unused_parameters() {
        let mut ps = ParamSet::with_id("floor");
        ps.add_float("exponent", &[10.0]);
        ps.add_string("name", &[String::from("plank")]);
        assert_eq!(ps.unused(), vec!["exponent", "id", "name"]);

        let _ = ps.id();
        let _ = ps.find_one_float("exponent", 1.0);
        assert_eq!(ps.unused(), vec!["name"]);
        ps.report_unused();
    }

    #[test]
    fn clamped_float() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut ps = ParamSet::new();
        ps.add_float("opacity", &[1.5]);
        assert_eq!(ps.find_one_float_clamped("opacity", 0.5, 0.0, 1.0), 1.0);
        assert_eq!(ps.find_one_float_clamped("missing", 0.5, 0.0, 1.0), 0.5);
    }
}
