use std::cell::Cell;

use recon_map::{MatchKind, MatchingOracle, OracleError};

/// Oracle wrapper that counts calls and failures for the run log.
pub struct InstrumentedOracle<'a> {
    inner: &'a dyn MatchingOracle,
    calls: Cell<usize>,
    failures: Cell<usize>,
}

impl<'a> InstrumentedOracle<'a> {
    pub fn new(inner: &'a dyn MatchingOracle) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
            failures: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn failures(&self) -> usize {
        self.failures.get()
    }
}

impl MatchingOracle for InstrumentedOracle<'_> {
    fn resolve(
        &self,
        kind: MatchKind,
        query: &str,
        candidates: &[String],
    ) -> Result<Option<String>, OracleError> {
        self.calls.set(self.calls.get() + 1);
        let result = self.inner.resolve(kind, query, candidates);
        if result.is_err() {
            self.failures.set(self.failures.get() + 1);
        }
        result
    }
}
