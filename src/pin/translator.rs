//! Pin number translation between naming conventions.
//!
//! For every ordered pair of conventions the translator precomputes a dense
//! index keyed by the source pin number, so each lookup is a bounds check
//! plus one array read.
//!
//! # Example
//!
//! ```
//! use pinbridge::pin::{PinNaming, Translator};
//!
//! let translator = Translator::shared().unwrap();
//! assert_eq!(translator.convert(PinNaming::Physical, PinNaming::Bcm, 11), Some(17));
//! assert_eq!(translator.convert(PinNaming::Physical, PinNaming::Bcm, 1), None);
//! ```

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use super::naming::PinNaming;
use super::table::PIN_TABLE;
use crate::error::{GpioError, Result};

/// Index entry for a source pin that never appears in the table.
pub const UNMAPPED: i32 = -1;

const NAMINGS: usize = PinNaming::ALL.len();

/// Precomputed many-to-many pin number conversion.
///
/// Immutable after construction; share it through [`Arc`].
#[derive(Debug)]
pub struct Translator {
    /// `indices[source * NAMINGS + target]`, empty on the diagonal.
    indices: Vec<Box<[i32]>>,
}

impl Translator {
    /// Build a translator from a table with one row per [`PinNaming`].
    ///
    /// # Errors
    ///
    /// Returns [`GpioError::Configuration`] if the row count does not match the
    /// number of conventions, rows differ in length, a row holds a negative
    /// pin number or a row repeats a pin number.
    pub fn new<R: AsRef<[i32]>>(table: &[R]) -> Result<Self> {
        if table.len() != NAMINGS {
            let message = format!(
                "Naming type count does not match. PinNaming has {} items but pin mapping table has {}",
                NAMINGS,
                table.len()
            );
            tracing::error!("{}", message);
            return Err(GpioError::Configuration(message));
        }

        let rows: Vec<&[i32]> = table.iter().map(AsRef::as_ref).collect();
        Self::validate_rows(&rows)?;

        let mut indices = Vec::with_capacity(NAMINGS * NAMINGS);
        for source in 0..NAMINGS {
            for target in 0..NAMINGS {
                if source == target {
                    indices.push(Box::default());
                } else {
                    indices.push(build_index(rows[source], rows[target]));
                }
            }
        }

        Ok(Self { indices })
    }

    /// Process-wide translator over the built-in [`PIN_TABLE`].
    ///
    /// Built on first use; later calls return the same instance.
    pub fn shared() -> Result<Arc<Translator>> {
        static SHARED: OnceLock<std::result::Result<Arc<Translator>, String>> = OnceLock::new();

        SHARED
            .get_or_init(|| match Translator::new(&PIN_TABLE) {
                Ok(translator) => Ok(Arc::new(translator)),
                Err(e) => Err(e.to_string()),
            })
            .clone()
            .map_err(GpioError::Configuration)
    }

    /// Convert `pin` from `source` numbering to `target` numbering.
    ///
    /// Returns `None` if the pin is negative, beyond the largest source pin
    /// or not part of the table. Same-convention conversion is the identity.
    pub fn convert(&self, source: PinNaming, target: PinNaming, pin: i32) -> Option<i32> {
        if source == target {
            return Some(pin);
        }

        let index = &self.indices[source.index() * NAMINGS + target.index()];
        let slot = usize::try_from(pin).ok()?;
        match index.get(slot) {
            Some(&mapped) if mapped != UNMAPPED => Some(mapped),
            _ => None,
        }
    }

    /// Like [`convert`](Self::convert), but failing with
    /// [`GpioError::InvalidPinNumber`] when there is no mapping.
    pub fn map_pin(&self, source: PinNaming, target: PinNaming, pin: i32) -> Result<i32> {
        self.convert(source, target, pin).ok_or_else(|| {
            let err = GpioError::InvalidPinNumber {
                pin,
                source_naming: source,
                target_naming: target,
            };
            tracing::error!("{}", err);
            err
        })
    }

    fn validate_rows(rows: &[&[i32]]) -> Result<()> {
        let columns = rows[0].len();
        for (naming, row) in PinNaming::ALL.iter().zip(rows) {
            if row.len() != columns {
                return Err(GpioError::Configuration(format!(
                    "{} row has {} pins, expected {}",
                    naming,
                    row.len(),
                    columns
                )));
            }

            let mut seen = HashSet::with_capacity(columns);
            for &pin in row.iter() {
                if pin < 0 {
                    return Err(GpioError::Configuration(format!(
                        "{} row holds negative pin number {}",
                        naming, pin
                    )));
                }
                if !seen.insert(pin) {
                    return Err(GpioError::Configuration(format!(
                        "{} row lists pin number {} twice",
                        naming, pin
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Dense `source pin -> target pin` array sized by the largest source pin.
fn build_index(source_row: &[i32], target_row: &[i32]) -> Box<[i32]> {
    let max_pin = source_row.iter().copied().max().unwrap_or(0);
    let mut index = vec![UNMAPPED; max_pin as usize + 1];
    for (&source_pin, &target_pin) in source_row.iter().zip(target_row) {
        index[source_pin as usize] = target_pin;
    }
    index.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::PIN_COLUMNS;

    const SAMPLE: [[i32; 4]; 3] = [[3, 5, 7, 8], [8, 9, 7, 15], [2, 3, 4, 14]];

    #[test]
    fn test_sample_table_lookups() {
        let t = Translator::new(&SAMPLE).unwrap();
        assert_eq!(t.convert(PinNaming::Physical, PinNaming::Bcm, 3), Some(2));
        assert_eq!(t.convert(PinNaming::Bcm, PinNaming::Physical, 4), Some(7));
        assert_eq!(t.convert(PinNaming::Physical, PinNaming::Bcm, 99), None);
        assert_eq!(t.convert(PinNaming::WiringPi, PinNaming::Bcm, 15), Some(14));
    }

    #[test]
    fn test_identity_for_every_naming() {
        let t = Translator::shared().unwrap();
        for naming in PinNaming::ALL {
            for pin in [-5, 0, 3, 40, 1000] {
                assert_eq!(t.convert(naming, naming, pin), Some(pin));
            }
        }
    }

    #[test]
    fn test_round_trip_every_column() {
        let t = Translator::shared().unwrap();
        for a in PinNaming::ALL {
            for b in PinNaming::ALL {
                for col in 0..PIN_COLUMNS {
                    let pa = PIN_TABLE[a.index()][col];
                    let pb = PIN_TABLE[b.index()][col];
                    assert_eq!(t.convert(a, b, pa), Some(pb), "{} -> {} col {}", a, b, col);
                    assert_eq!(t.convert(b, a, pb), Some(pa), "{} -> {} col {}", b, a, col);
                }
            }
        }
    }

    #[test]
    fn test_unmapped_pins_rejected() {
        let t = Translator::shared().unwrap();
        for source in PinNaming::ALL {
            let row = &PIN_TABLE[source.index()];
            let max = *row.iter().max().unwrap();
            for pin in 0..=max {
                if row.contains(&pin) {
                    continue;
                }
                for target in PinNaming::ALL.into_iter().filter(|&n| n != source) {
                    assert_eq!(t.convert(source, target, pin), None);
                }
            }
        }
        // Physical 1 is 3.3V power, physical 6 is ground.
        assert_eq!(t.convert(PinNaming::Physical, PinNaming::Bcm, 1), None);
        assert_eq!(t.convert(PinNaming::Physical, PinNaming::WiringPi, 6), None);
    }

    #[test]
    fn test_out_of_range_pins_rejected() {
        let t = Translator::shared().unwrap();
        assert_eq!(t.convert(PinNaming::Bcm, PinNaming::Physical, -1), None);
        assert_eq!(t.convert(PinNaming::Bcm, PinNaming::Physical, i32::MIN), None);
        assert_eq!(t.convert(PinNaming::Physical, PinNaming::Bcm, 41), None);
        assert_eq!(t.convert(PinNaming::WiringPi, PinNaming::Bcm, i32::MAX), None);
    }

    #[test]
    fn test_map_pin_error_carries_context() {
        let t = Translator::new(&SAMPLE).unwrap();
        assert_eq!(t.map_pin(PinNaming::Physical, PinNaming::Bcm, 5).unwrap(), 3);

        match t.map_pin(PinNaming::Physical, PinNaming::Bcm, 99) {
            Err(GpioError::InvalidPinNumber {
                pin,
                source_naming,
                target_naming,
            }) => {
                assert_eq!(pin, 99);
                assert_eq!(source_naming, PinNaming::Physical);
                assert_eq!(target_naming, PinNaming::Bcm);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_row_count_mismatch_is_configuration_error() {
        let two_rows = [[3, 5], [8, 9]];
        let err = Translator::new(&two_rows).unwrap_err();
        assert!(matches!(err, GpioError::Configuration(_)));
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_ragged_and_duplicate_rows_rejected() {
        let ragged: [&[i32]; 3] = [&[1, 2], &[3], &[4, 5]];
        assert!(matches!(
            Translator::new(&ragged),
            Err(GpioError::Configuration(_))
        ));

        let duplicate = [[1, 2], [3, 3], [4, 5]];
        let err = Translator::new(&duplicate).unwrap_err();
        assert!(err.to_string().contains("twice"));

        let negative = [[1, -2], [3, 4], [4, 5]];
        assert!(Translator::new(&negative).is_err());
    }

    #[test]
    fn test_shared_is_single_instance() {
        let a = Translator::shared().unwrap();
        let b = Translator::shared().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
