use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One fully vectorised training sample:
/// a padded index sequence plus its class (ham = 0, spam = 1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpamSample {
    pub input_ids: Vec<u32>,
    pub class:     usize,
}

impl SpamSample {
    pub fn new(input_ids: Vec<u32>, class: usize) -> Self {
        Self { input_ids, class }
    }
}

pub struct SpamDataset {
    samples: Vec<SpamSample>,
}

impl SpamDataset {
    pub fn new(samples: Vec<SpamSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<SpamSample> for SpamDataset {
    fn get(&self, index: usize) -> Option<SpamSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
