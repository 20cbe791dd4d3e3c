use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use phrase_segmenter_core::pipeline::batch_executor::{
    BatchExecutor, ProgressCallback, SegmentationJob,
};
use phrase_segmenter_core::pipeline::infrastructure::threaded_batch_executor::ThreadedBatchExecutor;
use phrase_segmenter_core::pipeline::segment_phrases_use_case::SegmentPhrasesUseCase;
use phrase_segmenter_core::pipeline::segmentation_summary::SegmentationSummary;
use phrase_segmenter_core::segmentation::domain::segment_config::SegmentConfig;
use phrase_segmenter_core::segmentation::infrastructure::config_file;
use phrase_segmenter_core::shared::constants::PHRASES_FILE_SUFFIX;
use phrase_segmenter_core::transcript::domain::aligned_segment::AlignedSegment;
use phrase_segmenter_core::transcript::domain::phrase_segment::PhraseSegment;
use phrase_segmenter_core::transcript::domain::segment_validator::SegmentValidator;
use phrase_segmenter_core::transcript::infrastructure::json_phrase_writer::JsonPhraseWriter;
use phrase_segmenter_core::transcript::infrastructure::json_transcript_reader::JsonTranscriptReader;

/// Segment word-aligned transcripts into subtitle phrases.
#[derive(Parser)]
#[command(name = "phrase-segmenter")]
struct Cli {
    /// Aligned transcript JSON files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file for a single input (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for batch outputs (default: next to each input).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// JSON config file (default: user config dir, if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gap in seconds that always separates phrases.
    #[arg(long)]
    silence_threshold: Option<f64>,

    /// Minimum words before punctuation or a pause may close a phrase.
    #[arg(long)]
    min_words: Option<usize>,

    /// Maximum words per phrase.
    #[arg(long)]
    max_words: Option<usize>,

    /// Maximum phrase duration in seconds.
    #[arg(long)]
    max_duration: Option<f64>,

    /// Maximum characters per phrase.
    #[arg(long)]
    max_chars: Option<usize>,

    /// Phrases shorter than this (seconds) get merged into a neighbour.
    #[arg(long)]
    min_duration: Option<f64>,

    /// Largest gap in seconds a short phrase may be merged across.
    #[arg(long)]
    merge_gap_limit: Option<f64>,

    /// Repair degenerate segment timings before segmenting.
    #[arg(long)]
    validate_segments: bool,

    /// Print the segmentation summary to stderr.
    #[arg(long)]
    summary: bool,

    /// Worker threads for batch mode (default: available cores).
    #[arg(short, long)]
    jobs: Option<usize>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;
    let config = build_config(&cli)?;

    if cli.inputs.len() == 1 && cli.out_dir.is_none() {
        run_single(&cli, &cli.inputs[0], config)
    } else {
        run_batch(&cli, config)
    }
}

fn run_single(
    cli: &Cli,
    input: &Path,
    config: SegmentConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let segments = read_segments(input, cli.validate_segments)?;
    let phrases = SegmentPhrasesUseCase::new(config).execute(&segments);

    let writer = JsonPhraseWriter::new();
    match cli.output {
        Some(ref output) => {
            writer.write(output, &phrases)?;
            log::info!("Output written to {}", output.display());
        }
        None => writer.write_to(io::stdout().lock(), &phrases)?,
    }

    if cli.summary {
        print_summary(&input.display().to_string(), &phrases)?;
    }
    Ok(())
}

fn run_batch(cli: &Cli, config: SegmentConfig) -> Result<(), Box<dyn std::error::Error>> {
    let jobs = cli
        .inputs
        .iter()
        .map(|input| -> Result<SegmentationJob, Box<dyn std::error::Error>> {
            let segments = read_segments(input, cli.validate_segments)?;
            Ok(SegmentationJob::new(input.display().to_string(), segments))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let executor = match cli.jobs {
        Some(n) => ThreadedBatchExecutor::with_workers(n),
        None => ThreadedBatchExecutor::new(),
    };
    let progress: ProgressCallback = Box::new(|current, total| {
        eprint!("\rSegmented {current}/{total}");
        true
    });
    let outcomes = executor.execute(jobs, &config, Some(progress))?;
    eprintln!();

    let writer = JsonPhraseWriter::new();
    for outcome in outcomes {
        let output = batch_output_path(Path::new(&outcome.name), cli.out_dir.as_deref());
        writer.write(&output, &outcome.phrases)?;
        log::info!("Output written to {}", output.display());
        if cli.summary {
            print_summary(&outcome.name, &outcome.phrases)?;
        }
    }
    Ok(())
}

fn read_segments(
    input: &Path,
    validate_segments: bool,
) -> Result<Vec<AlignedSegment>, Box<dyn std::error::Error>> {
    let segments = JsonTranscriptReader::new().read(input)?;
    log::info!("Read {} segments from {}", segments.len(), input.display());
    if validate_segments {
        return Ok(SegmentValidator::validate(&segments));
    }
    Ok(segments)
}

fn build_config(cli: &Cli) -> Result<SegmentConfig, Box<dyn std::error::Error>> {
    let mut config = config_file::load_or_default(cli.config.as_deref())?;
    if let Some(v) = cli.silence_threshold {
        config.silence_threshold = v;
    }
    if let Some(v) = cli.min_words {
        config.min_words = v;
    }
    if let Some(v) = cli.max_words {
        config.max_words = v;
    }
    if let Some(v) = cli.max_duration {
        config.max_duration = v;
    }
    if let Some(v) = cli.max_chars {
        config.max_chars = v;
    }
    if let Some(v) = cli.min_duration {
        config.min_duration = v;
    }
    if let Some(v) = cli.merge_gap_limit {
        config.merge_gap_limit = v;
    }
    config.validate()?;
    Ok(config)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    for input in &cli.inputs {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
    }
    if cli.output.is_some() && cli.inputs.len() > 1 {
        return Err("--output takes a single input; use --out-dir for batches".into());
    }
    if cli.output.is_some() && cli.out_dir.is_some() {
        return Err("--output and --out-dir are mutually exclusive".into());
    }
    if cli.jobs == Some(0) {
        return Err("Jobs must be at least 1".into());
    }
    Ok(())
}

fn batch_output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transcript".to_string());
    let file_name = format!("{stem}.{PHRASES_FILE_SUFFIX}");
    match out_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

fn print_summary(name: &str, phrases: &[PhraseSegment]) -> Result<(), Box<dyn std::error::Error>> {
    let summary = SegmentationSummary::from_phrases(phrases);
    eprintln!("{name}: {}", serde_json::to_string(&summary)?);
    Ok(())
}
