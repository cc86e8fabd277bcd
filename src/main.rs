use anyhow::{Context, Result};
use clap::Parser;
use distance_cluster_analyzer::cluster::sweep::threshold_sweep;
use distance_cluster_analyzer::{cluster_matrix_file, storage, Config};

#[derive(Parser, Debug)]
#[clap(
    name = "distance-cluster-analyzer",
    about = "Group samples into putative transmission clusters from a pairwise distance matrix"
)]
struct Cli {
    /// Path to the distance matrix file
    #[clap(long)]
    matrix: String,

    /// Maximum distance (inclusive) for two samples to be linked
    #[clap(long, default_value = "6")]
    threshold: u32,

    /// Field delimiter of the matrix file
    #[clap(long, default_value = ",")]
    delimiter: char,

    /// Label for the distance values, used as the column name in pairs.csv
    #[clap(long, default_value = "distance")]
    label: String,

    /// Leave out samples with no link at the threshold instead of reporting them alone
    #[clap(long)]
    exclude_singletons: bool,

    /// Output directory for results
    #[clap(long, default_value = "cluster_results")]
    output_dir: String,

    /// Additional thresholds to cluster at, comma separated
    #[clap(long, value_delimiter = ',')]
    sweep: Vec<u32>,

    /// Number of worker threads for --sweep (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    if !args.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character, got '{}'", args.delimiter);
    }

    let config = Config::new(
        args.delimiter as u8,
        args.threshold,
        !args.exclude_singletons,
        args.label,
        args.threads,
    );

    log::info!("Starting distance cluster analysis");
    log::info!("Input: {}", args.matrix);
    log::info!("Output: {}", args.output_dir);

    // 1. Load, link and cluster
    let result = cluster_matrix_file(&args.matrix, &config)
        .with_context(|| format!("failed to cluster '{}'", args.matrix))?;

    log::debug!(
        "Matrix uses ~{} bytes, graph ~{} bytes",
        result.matrix.memory_usage(),
        result.graph.memory_usage()
    );

    // 2. Report
    println!("{}", result.report());

    // 3. Save results
    storage::save_results(&result, &config, &args.output_dir)?;

    // 4. Optional sweep over other thresholds
    if !args.sweep.is_empty() {
        let num_threads = config.worker_threads();
        log::info!("Using {} worker threads", num_threads);
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()?;

        let sweep = threshold_sweep(&result.matrix, &args.sweep, config.include_singletons);
        for entry in &sweep {
            log::info!(
                "Threshold {}: {} clusters, largest has {} samples",
                entry.threshold,
                entry.clusters.len(),
                entry.largest_cluster_size()
            );
        }
        storage::save_sweep(&sweep, &args.output_dir)?;
    }

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
