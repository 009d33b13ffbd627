//! Isoelectric point estimation from amino-acid composition
//!
//! Uses the Bjellqvist-style pK set with terminal-residue corrections and a
//! bisection search for the pH of zero net charge.

/// Sequences shorter than this are not estimated
pub const MIN_SEQUENCE_LEN: usize = 5;

const START_PH: f64 = 7.775;
const MIN_PH: f64 = 4.05;
const MAX_PH: f64 = 12.0;
const TOLERANCE: f64 = 0.0001;

const N_TERM_PK: f64 = 9.0;
const C_TERM_PK: f64 = 2.0;

/// Side chains carrying positive charge below their pK
const POSITIVE_PKS: [(u8, f64); 3] = [(b'K', 10.0), (b'R', 12.0), (b'H', 5.98)];

/// Side chains carrying negative charge above their pK
const NEGATIVE_PKS: [(u8, f64); 4] = [(b'D', 4.05), (b'E', 4.45), (b'C', 9.0), (b'Y', 10.0)];

fn n_terminal_pk(residue: u8) -> f64 {
    match residue {
        b'A' => 7.59,
        b'M' => 7.0,
        b'S' => 6.93,
        b'P' => 8.36,
        b'T' => 6.82,
        b'V' => 7.44,
        b'E' => 7.7,
        _ => N_TERM_PK,
    }
}

fn c_terminal_pk(residue: u8) -> f64 {
    match residue {
        b'D' => 4.55,
        b'E' => 4.75,
        _ => C_TERM_PK,
    }
}

/// Charged-group counts and pK values for one sequence
#[derive(Debug, Clone)]
pub struct ChargeProfile {
    positive: Vec<(f64, f64)>,
    negative: Vec<(f64, f64)>,
}

impl ChargeProfile {
    /// Returns `None` for sequences shorter than [`MIN_SEQUENCE_LEN`]
    /// after whitespace is removed.
    pub fn from_sequence(sequence: &str) -> Option<Self> {
        let residues: Vec<u8> = sequence
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .map(|b| b.to_ascii_uppercase())
            .collect();

        if residues.len() < MIN_SEQUENCE_LEN {
            return None;
        }

        let count = |aa: u8| residues.iter().filter(|&&r| r == aa).count() as f64;

        let mut positive = vec![(1.0, n_terminal_pk(residues[0]))];
        positive.extend(POSITIVE_PKS.iter().map(|&(aa, pk)| (count(aa), pk)));

        let mut negative = vec![(1.0, c_terminal_pk(residues[residues.len() - 1]))];
        negative.extend(NEGATIVE_PKS.iter().map(|&(aa, pk)| (count(aa), pk)));

        Some(Self { positive, negative })
    }

    /// Net charge at the given pH
    pub fn charge_at(&self, ph: f64) -> f64 {
        let positive: f64 = self
            .positive
            .iter()
            .map(|&(n, pk)| n / (10f64.powf(ph - pk) + 1.0))
            .sum();
        let negative: f64 = self
            .negative
            .iter()
            .map(|&(n, pk)| n / (10f64.powf(pk - ph) + 1.0))
            .sum();
        positive - negative
    }

    /// pH of zero net charge, searched within [4.05, 12]
    pub fn isoelectric_point(&self) -> f64 {
        let (mut low, mut high) = (MIN_PH, MAX_PH);
        let mut ph = START_PH;

        loop {
            if high - low <= TOLERANCE {
                return ph;
            }
            if self.charge_at(ph) > 0.0 {
                low = ph;
            } else {
                high = ph;
            }
            ph = (low + high) / 2.0;
        }
    }
}

/// Estimated pI, or `None` when the sequence is too short
pub fn isoelectric_point(sequence: &str) -> Option<f64> {
    ChargeProfile::from_sequence(sequence).map(|profile| profile.isoelectric_point())
}
