use std::fmt;

use serde::{Deserialize, Serialize};

/// A fixed license category identified by a single letter.
pub trait LicenseClass: Copy + PartialEq + 'static {
    /// Every class of this kind, in the order reports list them.
    fn all() -> &'static [Self];

    /// The class letter as printed on the license.
    fn letter(&self) -> &'static str;
}

/// Weapon license classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GunLicense {
    A,
    B,
    C,
    D,
    E,
}

static ALL_GUN_LICENSES: &[GunLicense] = &[
    GunLicense::A,
    GunLicense::B,
    GunLicense::C,
    GunLicense::D,
    GunLicense::E,
];

impl LicenseClass for GunLicense {
    fn all() -> &'static [Self] {
        ALL_GUN_LICENSES
    }

    fn letter(&self) -> &'static str {
        match self {
            GunLicense::A => "A",
            GunLicense::B => "B",
            GunLicense::C => "C",
            GunLicense::D => "D",
            GunLicense::E => "E",
        }
    }
}

/// Driver's license classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DriversLicense {
    A,
    B,
    C,
}

static ALL_DRIVERS_LICENSES: &[DriversLicense] =
    &[DriversLicense::A, DriversLicense::B, DriversLicense::C];

impl LicenseClass for DriversLicense {
    fn all() -> &'static [Self] {
        ALL_DRIVERS_LICENSES
    }

    fn letter(&self) -> &'static str {
        match self {
            DriversLicense::A => "A",
            DriversLicense::B => "B",
            DriversLicense::C => "C",
        }
    }
}

#[mutants::skip]
impl fmt::Display for GunLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

#[mutants::skip]
impl fmt::Display for DriversLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Collapses one checkbox per class into the ordered set of held classes.
///
/// `checked[i]` corresponds to `L::all()[i]`; missing trailing entries count
/// as unchecked and extra entries are ignored.
pub fn collect_licenses<L: LicenseClass>(checked: &[bool]) -> Vec<L> {
    L::all()
        .iter()
        .zip(checked.iter().chain(std::iter::repeat(&false)))
        .filter_map(|(class, &held)| held.then_some(*class))
        .collect()
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn gun_letters_in_order() {
        let letters: Vec<&str> = GunLicense::all().iter().map(|l| l.letter()).collect();
        assert_eq!(letters, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn drivers_letters_in_order() {
        let letters: Vec<&str> = DriversLicense::all().iter().map(|l| l.letter()).collect();
        assert_eq!(letters, vec!["A", "B", "C"]);
    }

    #[test]
    fn collect_picks_checked_boxes() {
        let held: Vec<GunLicense> = collect_licenses(&[true, false, true, false, true]);
        assert_eq!(held, vec![GunLicense::A, GunLicense::C, GunLicense::E]);
    }

    #[test]
    fn collect_none_checked() {
        let held: Vec<DriversLicense> = collect_licenses(&[false, false, false]);
        assert!(held.is_empty());
    }

    #[test]
    fn collect_short_input_treats_rest_as_unchecked() {
        let held: Vec<GunLicense> = collect_licenses(&[false, true]);
        assert_eq!(held, vec![GunLicense::B]);
    }

    #[test]
    fn serde_uses_bare_letter() {
        let json = serde_json::to_string(&vec![DriversLicense::A, DriversLicense::C]).unwrap();
        assert_eq!(json, r#"["A","C"]"#);
    }

    #[test]
    fn letter_outside_enumeration_rejected() {
        assert!(serde_json::from_str::<DriversLicense>("\"D\"").is_err());
    }

    #[quickcheck]
    fn collected_set_is_ordered_subset(mask: u8) -> bool {
        let checked: Vec<bool> = (0..5).map(|i| mask & (1 << i) != 0).collect();
        let held: Vec<GunLicense> = collect_licenses(&checked);
        let expected = checked.iter().filter(|&&c| c).count();
        held.len() == expected && held.windows(2).all(|w| w[0] < w[1])
    }
}
