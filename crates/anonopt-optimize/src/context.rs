use anonopt_core::{Dataset, Level, PrivacyConfig};

/// Run-scoped search state.
///
/// Holds the only mutable borrow of the dataset for the whole search, so
/// candidates are probed strictly one after another.
#[derive(Debug)]
pub struct SearchContext<'a> {
    dataset: &'a mut Dataset,
    config: PrivacyConfig,
    bound: &'a [String],
    free: &'a [String],
}

impl<'a> SearchContext<'a> {
    pub fn new(
        dataset: &'a mut Dataset,
        config: PrivacyConfig,
        bound: &'a [String],
        free: &'a [String],
    ) -> Self {
        Self {
            dataset,
            config,
            bound,
            free,
        }
    }

    pub fn config(&self) -> &PrivacyConfig {
        &self.config
    }

    pub fn bound(&self) -> &[String] {
        self.bound
    }

    pub fn free(&self) -> &[String] {
        self.free
    }

    pub fn dataset(&self) -> &Dataset {
        &*self.dataset
    }

    pub fn dataset_mut(&mut self) -> &mut Dataset {
        &mut *self.dataset
    }

    /// Pin each free quasi-identifier to the level at the same position.
    pub fn pin_candidate(&mut self, candidate: &[Level]) {
        let definition = self.dataset.definition_mut();
        for (qid, level) in self.free.iter().zip(candidate) {
            definition.pin(qid, *level);
        }
    }
}
