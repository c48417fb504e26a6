use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;

use headturn_core::pipeline::analysis_logger::SummaryAnalysisLogger;
use headturn_core::pipeline::analyze_sequence_use_case::{AnalyzeSequenceUseCase, FrameCallback};
use headturn_core::pipeline::detection_history::DetectionHistory;
use headturn_core::pipeline::frame_analyzer::{FrameAnalysis, FrameAnalyzer};
use headturn_core::shared::analyzer_config::AnalyzerConfig;
use headturn_core::shared::orientation::Orientation;
use headturn_core::video::infrastructure::image_sequence_reader::ImageSequenceReader;

/// Estimate head orientation from skin-color analysis of image frames.
#[derive(Parser)]
#[command(name = "headturn")]
struct Cli {
    /// Input image file, or a directory of frames read in file-name order.
    input: PathBuf,

    /// JSON config file (defaults to <config dir>/headturn/config.json if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated time between consecutive frames, in milliseconds.
    #[arg(long, default_value = "100")]
    frame_interval_ms: u64,

    /// Number of smoothed detections to keep for the final history.
    #[arg(long)]
    history: Option<usize>,

    /// Print one JSON object per frame instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct FrameRecord {
    frame: usize,
    elapsed_ms: u64,
    orientation: Orientation,
    confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<RegionRecord>,
}

#[derive(Serialize)]
struct RegionRecord {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    center_x: f64,
    center_y: f64,
}

impl FrameRecord {
    fn new(analysis: &FrameAnalysis, frame: usize, elapsed_ms: u64) -> Self {
        Self {
            frame,
            elapsed_ms,
            orientation: analysis.detection.orientation,
            confidence: analysis.detection.confidence,
            region: analysis.geometry.map(|g| {
                let (x, y, width, height) = g.bounding_box();
                RegionRecord {
                    x,
                    y,
                    width,
                    height,
                    center_x: g.center_x,
                    center_y: g.center_y,
                }
            }),
        }
    }

    fn to_text(&self) -> String {
        let mut line = format!(
            "frame {:>5}  {:>7}ms  {:8}  {:.2}",
            self.frame, self.elapsed_ms, self.orientation, self.confidence
        );
        if let Some(r) = &self.region {
            line.push_str(&format!(
                "  box ({:.0}, {:.0}) {:.0}x{:.0}",
                r.x, r.y, r.width, r.height
            ));
        }
        line
    }
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

    let mut config = AnalyzerConfig::resolve(cli.config.as_deref())?;
    if let Some(capacity) = cli.history {
        config.history_capacity = capacity;
    }

    let analyzer =
        FrameAnalyzer::from_config(&config).with_logger(Box::new(SummaryAnalysisLogger::new()));
    let history = DetectionHistory::new(config.history_capacity);
    let interval = Duration::from_millis(cli.frame_interval_ms);

    let mut use_case = AnalyzeSequenceUseCase::new(
        Box::new(ImageSequenceReader::new()),
        analyzer,
        history,
        Some(frame_printer(cli.json, cli.frame_interval_ms)),
    );
    let report = use_case.execute(&cli.input, interval)?;

    log::info!(
        "Analysed {} frames ({} with a face) from {}",
        report.frames,
        report.face_frames(),
        cli.input.display()
    );
    for (age, detection) in report.history.iter().enumerate() {
        log::info!(
            "  history[{age}]: {:8} {:.2}",
            detection.orientation,
            detection.confidence
        );
    }
    Ok(())
}

fn frame_printer(json: bool, interval_ms: u64) -> FrameCallback {
    Box::new(move |analysis: &FrameAnalysis, done: usize, _total: usize| {
        let index = done - 1;
        let record = FrameRecord::new(analysis, index, index as u64 * interval_ms);
        if !json {
            println!("{}", record.to_text());
            return true;
        }
        match serde_json::to_string(&record) {
            Ok(line) => {
                println!("{line}");
                true
            }
            Err(e) => {
                log::error!("Failed to serialise frame {index}: {e}");
                false
            }
        }
    })
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input not found: {}", cli.input.display()).into());
    }
    if cli.frame_interval_ms == 0 {
        return Err("Frame interval must be at least 1 ms".into());
    }
    if cli.history == Some(0) {
        return Err("History must keep at least 1 entry".into());
    }
    Ok(())
}
