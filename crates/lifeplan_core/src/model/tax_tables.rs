//! Tax rate tables: brackets, deductions, and RMD distribution periods
//!
//! These are read-only inputs to a run; the engine never mutates them.
//! Inflation adjustment produces scaled copies (see `taxes::adjust_tax_data`).

use serde::{Deserialize, Serialize};

use super::scenario::MaritalStatus;

/// One progressive bracket. `upper == None` marks the unbounded top bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub lower: f64,
    pub upper: Option<f64>,
    pub rate: f64,
}

impl TaxBracket {
    #[must_use]
    pub fn new(lower: f64, upper: Option<f64>, rate: f64) -> Self {
        TaxBracket { lower, upper, rate }
    }

    /// Upper boundary, `f64::INFINITY` for the top bracket.
    #[must_use]
    pub fn ceiling(&self) -> f64 {
        self.upper.unwrap_or(f64::INFINITY)
    }

    /// Bracket with both boundaries scaled by a cumulative inflation factor.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        TaxBracket {
            lower: self.lower * factor,
            upper: self.upper.map(|u| u * factor),
            rate: self.rate,
        }
    }
}

/// Bracket tables and deduction for one filing status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilingTables {
    pub standard_deduction: f64,
    /// Ascending; last bracket unbounded.
    pub federal_brackets: Vec<TaxBracket>,
    pub state_brackets: Vec<TaxBracket>,
    pub capital_gains_brackets: Vec<TaxBracket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxTables {
    pub single: FilingTables,
    pub married: FilingTables,
    pub rmd_table: RmdTable,
}

impl TaxTables {
    #[must_use]
    pub fn for_status(&self, status: MaritalStatus) -> &FilingTables {
        match status {
            MaritalStatus::Single => &self.single,
            MaritalStatus::Married => &self.married,
        }
    }

    /// 2024 federal tables with a flat 5% state placeholder.
    ///
    /// Real state tables come from the host; this constructor exists for the
    /// CLI default and for tests.
    #[must_use]
    pub fn us_2024() -> Self {
        let state = vec![TaxBracket::new(0.0, None, 0.05)];
        TaxTables {
            single: FilingTables {
                standard_deduction: 14_600.0,
                federal_brackets: vec![
                    TaxBracket::new(0.0, Some(11_600.0), 0.10),
                    TaxBracket::new(11_600.0, Some(47_150.0), 0.12),
                    TaxBracket::new(47_150.0, Some(100_525.0), 0.22),
                    TaxBracket::new(100_525.0, Some(191_950.0), 0.24),
                    TaxBracket::new(191_950.0, Some(243_725.0), 0.32),
                    TaxBracket::new(243_725.0, Some(609_350.0), 0.35),
                    TaxBracket::new(609_350.0, None, 0.37),
                ],
                state_brackets: state.clone(),
                capital_gains_brackets: vec![
                    TaxBracket::new(0.0, Some(47_025.0), 0.0),
                    TaxBracket::new(47_025.0, Some(518_900.0), 0.15),
                    TaxBracket::new(518_900.0, None, 0.20),
                ],
            },
            married: FilingTables {
                standard_deduction: 29_200.0,
                federal_brackets: vec![
                    TaxBracket::new(0.0, Some(23_200.0), 0.10),
                    TaxBracket::new(23_200.0, Some(94_300.0), 0.12),
                    TaxBracket::new(94_300.0, Some(201_050.0), 0.22),
                    TaxBracket::new(201_050.0, Some(383_900.0), 0.24),
                    TaxBracket::new(383_900.0, Some(487_450.0), 0.32),
                    TaxBracket::new(487_450.0, Some(731_200.0), 0.35),
                    TaxBracket::new(731_200.0, None, 0.37),
                ],
                state_brackets: state,
                capital_gains_brackets: vec![
                    TaxBracket::new(0.0, Some(94_050.0), 0.0),
                    TaxBracket::new(94_050.0, Some(583_750.0), 0.15),
                    TaxBracket::new(583_750.0, None, 0.20),
                ],
            },
            rmd_table: RmdTable::irs_uniform_lifetime_2024(),
        }
    }
}

/// IRS Uniform Lifetime Table for required minimum distributions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RmdTable {
    pub entries: Vec<RmdTableEntry>,
}

/// Single entry mapping age to IRS distribution period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RmdTableEntry {
    pub age: u8,
    pub period: f64,
}

impl RmdTable {
    /// IRS Uniform Lifetime Table (2024)
    #[must_use]
    pub fn irs_uniform_lifetime_2024() -> Self {
        const PERIODS: [(u8, f64); 48] = [
            (73, 26.5),
            (74, 25.5),
            (75, 24.6),
            (76, 23.7),
            (77, 22.9),
            (78, 22.0),
            (79, 21.1),
            (80, 20.2),
            (81, 19.4),
            (82, 18.5),
            (83, 17.7),
            (84, 16.8),
            (85, 16.0),
            (86, 15.2),
            (87, 14.4),
            (88, 13.7),
            (89, 12.9),
            (90, 12.2),
            (91, 11.5),
            (92, 10.8),
            (93, 10.1),
            (94, 9.5),
            (95, 8.9),
            (96, 8.4),
            (97, 7.8),
            (98, 7.3),
            (99, 6.8),
            (100, 6.4),
            (101, 6.0),
            (102, 5.6),
            (103, 5.2),
            (104, 4.9),
            (105, 4.6),
            (106, 4.3),
            (107, 4.1),
            (108, 3.9),
            (109, 3.7),
            (110, 3.5),
            (111, 3.4),
            (112, 3.3),
            (113, 3.1),
            (114, 3.0),
            (115, 2.9),
            (116, 2.8),
            (117, 2.7),
            (118, 2.5),
            (119, 2.3),
            (120, 2.0),
        ];
        RmdTable {
            entries: PERIODS
                .iter()
                .map(|&(age, period)| RmdTableEntry { age, period })
                .collect(),
        }
    }

    /// Distribution period for a specific age, exact match only.
    #[must_use]
    pub fn period_for_age(&self, age: u8) -> Option<f64> {
        self.entries.iter().find(|e| e.age == age).map(|e| e.period)
    }
}
