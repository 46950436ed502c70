//! Append-only sample matrix.

use std::collections::HashMap;

use pt_core::VarPath;

use crate::{LogError, LogResult};

/// Sample history of every bound variable.
///
/// Rows are variables in binding order, columns are steps since the last
/// reinitialisation. All rows always have `ncol` entries; history that
/// predates a binding is `NaN`, never zero. Rows are never removed.
#[derive(Debug, Clone)]
pub struct TimeSeriesLog {
    dt: f64,
    variables: Vec<VarPath>,
    index: HashMap<VarPath, usize>,
    rows: Vec<Vec<f64>>,
    ncol: usize,
}

impl TimeSeriesLog {
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            variables: Vec::new(),
            index: HashMap::new(),
            rows: Vec::new(),
            ncol: 0,
        }
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Change the sample spacing, e.g. after the engine was reconfigured.
    pub fn set_dt(&mut self, dt: f64) {
        self.dt = dt;
    }

    pub fn ncol(&self) -> usize {
        self.ncol
    }

    pub fn variables(&self) -> &[VarPath] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.row_index(path).is_some()
    }

    fn row_index(&self, path: &str) -> Option<usize> {
        self.index.get(path).copied()
    }

    /// Start tracking every variable in `vars` that is not tracked yet.
    ///
    /// A new row is `NaN` for all columns but the last, which receives the
    /// current value from `read`. When the log has no column yet, a first
    /// column is sampled for every row. Returns the newly bound variables.
    pub fn bind<E>(
        &mut self,
        vars: &[VarPath],
        mut read: impl FnMut(&VarPath) -> Result<f64, E>,
    ) -> Result<Vec<VarPath>, E> {
        let mut fresh: Vec<VarPath> = Vec::new();
        for var in vars {
            if !self.index.contains_key(var) && !fresh.contains(var) {
                fresh.push(var.clone());
            }
        }
        if fresh.is_empty() {
            return Ok(fresh);
        }

        if self.ncol == 0 {
            // First column: sample everything, old rows included.
            let old: Vec<f64> = self
                .variables
                .iter()
                .map(&mut read)
                .collect::<Result<_, E>>()?;
            let new: Vec<f64> = fresh.iter().map(&mut read).collect::<Result<_, E>>()?;
            for (row, value) in self.rows.iter_mut().zip(old) {
                row.push(value);
            }
            for (var, value) in fresh.iter().zip(new) {
                self.push_row(var.clone(), vec![value]);
            }
            self.ncol = 1;
        } else {
            let new: Vec<f64> = fresh.iter().map(&mut read).collect::<Result<_, E>>()?;
            for (var, value) in fresh.iter().zip(new) {
                let mut row = vec![f64::NAN; self.ncol];
                row[self.ncol - 1] = value;
                self.push_row(var.clone(), row);
            }
        }
        tracing::debug!(count = fresh.len(), ncol = self.ncol, "variables bound to log");
        Ok(fresh)
    }

    fn push_row(&mut self, var: VarPath, row: Vec<f64>) {
        self.index.insert(var.clone(), self.rows.len());
        self.variables.push(var);
        self.rows.push(row);
    }

    /// Append one column, reading every tracked variable.
    ///
    /// All values are read before any row grows, so a failed read leaves
    /// the log untouched.
    pub fn step<E>(&mut self, mut read: impl FnMut(&VarPath) -> Result<f64, E>) -> Result<(), E> {
        let column: Vec<f64> = self
            .variables
            .iter()
            .map(&mut read)
            .collect::<Result<_, E>>()?;
        for (row, value) in self.rows.iter_mut().zip(column) {
            row.push(value);
        }
        self.ncol += 1;
        Ok(())
    }

    /// Truncate every row to one sample of the reset state (or to nothing
    /// when no variable is bound).
    pub fn reinit<E>(&mut self, mut read: impl FnMut(&VarPath) -> Result<f64, E>) -> Result<(), E> {
        let column: Vec<f64> = self
            .variables
            .iter()
            .map(&mut read)
            .collect::<Result<_, E>>()?;
        for (row, value) in self.rows.iter_mut().zip(column) {
            row.clear();
            row.push(value);
        }
        self.ncol = usize::from(!self.variables.is_empty());
        tracing::debug!(rows = self.rows.len(), "log reinitialised");
        Ok(())
    }

    /// Full history of `path`.
    pub fn history_of(&self, path: &str) -> LogResult<&[f64]> {
        self.row_index(path)
            .map(|i| self.rows[i].as_slice())
            .ok_or_else(|| LogError::UnknownVariable {
                path: path.to_string(),
            })
    }

    /// History of `path`, or an empty series if it was never bound.
    ///
    /// Querying an unbound variable is a caller bug; debug builds panic.
    pub fn history_or_empty(&self, path: &str) -> &[f64] {
        match self.history_of(path) {
            Ok(row) => row,
            Err(err) => {
                debug_assert!(false, "{err}");
                &[]
            }
        }
    }

    /// Sample `i` of `path`, if both exist.
    pub fn value_at(&self, path: &str, i: usize) -> Option<f64> {
        self.history_of(path).ok().and_then(|row| row.get(i).copied())
    }

    /// Row by binding index.
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Time of column `i`.
    pub fn time(&self, i: usize) -> f64 {
        i as f64 * self.dt
    }

    pub fn last_time(&self) -> Option<f64> {
        self.ncol.checked_sub(1).map(|i| self.time(i))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::convert::Infallible;

    proptest! {
        #[test]
        fn rows_stay_aligned(
            ops in prop::collection::vec((any::<bool>(), 0usize..6), 1..40)
        ) {
            let names = ["a", "b/c", "b/d", "e/f/g", "h", "i"];
            let mut log = TimeSeriesLog::new(0.1);
            let mut steps = 0usize;
            let mut counter = 0.0;
            for (is_step, which) in ops {
                if is_step {
                    let ncol_before = log.ncol();
                    log.step(|_| { counter += 1.0; Ok::<_, Infallible>(counter) }).unwrap();
                    prop_assert_eq!(log.ncol(), ncol_before + 1);
                    steps += 1;
                } else {
                    let var = VarPath::parse(names[which]).unwrap();
                    log.bind(&[var], |_| Ok::<_, Infallible>(0.0)).unwrap();
                }
                for i in 0..log.len() {
                    prop_assert_eq!(log.row(i).unwrap().len(), log.ncol());
                }
            }
            prop_assert!(log.ncol() <= steps + 1);
        }
    }
}
