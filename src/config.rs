//! Configuration management for the distance cluster analyzer

/// Parameters for one clustering run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Field delimiter of the matrix file
    pub delimiter: u8,

    /// Maximum distance (inclusive) for two samples to be linked
    pub threshold: u32,

    /// Keep samples without any qualifying link as singleton clusters
    pub include_singletons: bool,

    /// Name attached to the matrix values, e.g. the sequencing technology
    pub value_label: String,

    /// Worker threads for threshold sweeps (0 = all cores)
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: b',',
            threshold: 6,
            include_singletons: true,
            value_label: "distance".to_string(),
            threads: 0,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        delimiter: u8,
        threshold: u32,
        include_singletons: bool,
        value_label: impl Into<String>,
        threads: usize,
    ) -> Self {
        Self {
            delimiter,
            threshold,
            include_singletons,
            value_label: value_label.into(),
            threads,
        }
    }

    /// Resolve the thread count, mapping 0 to the number of available cores
    pub fn worker_threads(&self) -> usize {
        if self.threads > 0 {
            self.threads
        } else {
            num_cpus::get()
        }
    }
}
