use anyhow::Result;
use tracing::{debug, info};

use rust_tracks::fusion::TracksBuilder;
use rust_tracks::io::config::FusionConfig;
use rust_tracks::io::matches_csv::load_pairwise_matches;
use rust_tracks::tracks::track_length_histogram;

fn main() -> Result<()> {
    // Initialize tracing subscriber with environment filter
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let matches_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/matches.csv".to_string());
    let config = match std::env::args().nth(2) {
        Some(path) => FusionConfig::from_yaml(&path)?,
        None => FusionConfig::default(),
    };

    let pairs = load_pairwise_matches(&matches_path)?;
    let num_matches: usize = pairs.iter().map(|p| p.matches.len()).sum();
    info!(
        "Loaded {} view pairs, {} matches from {}",
        pairs.len(),
        num_matches,
        matches_path
    );

    let mut builder = TracksBuilder::build(&pairs);
    info!("Fused {} candidate tracks", builder.num_tracks());

    let erased = builder.filter(config.min_track_length);
    info!(
        "Conflict filter removed {} tracks, {} remain",
        erased,
        builder.num_tracks()
    );

    if let Some(min_occurrences) = config.min_pair_occurrences {
        let erased = builder.filter_pairwise_min_matches(min_occurrences);
        info!(
            "Pairwise support filter removed {} tracks, {} remain",
            erased,
            builder.num_tracks()
        );
    }

    let tracks = builder.export_tracks()?;
    for (length, count) in track_length_histogram(&tracks) {
        debug!("{} tracks of length {}", count, length);
    }

    let stdout = std::io::stdout();
    builder.export_to_stream(&mut stdout.lock())?;

    Ok(())
}
