use std::collections::HashSet;
use std::sync::Mutex;

use rand::seq::SliceRandom;
use tracing::info;

/// Serves each catalog image exactly once per cycle, in a uniformly random
/// order, and reshuffles once the catalog is exhausted. The served-set is
/// shared by all users of the process.
pub struct ImageSampler {
    images: Vec<String>,
    served: Mutex<HashSet<usize>>,
}

impl ImageSampler {
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images,
            served: Mutex::new(HashSet::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Panics on an empty catalog; callers must check `is_empty` first.
    pub fn next(&self) -> String {
        assert!(
            !self.images.is_empty(),
            "image sampler invoked on an empty catalog"
        );

        let mut served = self.served.lock().unwrap();
        if served.len() == self.images.len() {
            served.clear();
            info!("All images served, starting a new cycle");
        }

        let available: Vec<usize> = (0..self.images.len())
            .filter(|i| !served.contains(i))
            .collect();
        let mut rng = rand::thread_rng();
        let index = *available.choose(&mut rng).unwrap();
        served.insert(index);
        self.images[index].clone()
    }
}

/// Uniform with replacement, independent of history.
pub struct CaptionSampler {
    captions: Vec<String>,
}

impl CaptionSampler {
    pub fn new(captions: Vec<String>) -> Self {
        Self { captions }
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    /// Panics on an empty pool; callers must check `is_empty` first.
    pub fn next(&self) -> String {
        let mut rng = rand::thread_rng();
        self.captions
            .choose(&mut rng)
            .expect("caption sampler invoked on an empty pool")
            .clone()
    }
}
