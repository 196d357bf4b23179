use std::process::Command;
use trend_estimator::charts::{ChartCanvas, ChartRenderer, PngCanvas, RenderError};
use trend_estimator::config::RenderConfig;
use trend_estimator::data::Dataset;

fn png_canvas(config: &RenderConfig) -> PngCanvas {
    PngCanvas::new(ChartRenderer::PANEL_COUNT, config.width, config.height)
}

#[test]
fn writes_a_decodable_png() {
    let dir = tempfile::tempdir().unwrap();
    let config = RenderConfig::default().with_output_path(dir.path().join("hasil_estimasi.png"));
    let dataset = Dataset::indonesia().unwrap();

    let mut canvas = png_canvas(&config);
    let summary = ChartRenderer::render_figure(&dataset, &config, &mut canvas).unwrap();

    let metadata = std::fs::metadata(&summary.output_path).unwrap();
    assert!(metadata.len() > 0);

    let decoded = image::open(&summary.output_path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1000, 1000));
}

#[test]
fn repeated_renders_plot_identical_data() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = Dataset::indonesia().unwrap();

    let first_config = RenderConfig::default().with_output_path(dir.path().join("first.png"));
    let second_config = RenderConfig::default().with_output_path(dir.path().join("second.png"));

    let mut first = png_canvas(&first_config);
    let mut second = png_canvas(&second_config);
    ChartRenderer::render_figure(&dataset, &first_config, &mut first).unwrap();
    ChartRenderer::render_figure(&dataset, &second_config, &mut second).unwrap();

    assert_eq!(first.figure(), second.figure());

    let first_pixels = image::open(dir.path().join("first.png")).unwrap().to_rgb8();
    let second_pixels = image::open(dir.path().join("second.png")).unwrap().to_rgb8();
    assert_eq!(first_pixels, second_pixels);
}

#[test]
fn unwritable_path_is_a_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("missing").join("hasil_estimasi.png");
    let config = RenderConfig {
        width: 400,
        height: 400,
        ..RenderConfig::default()
    }
    .with_output_path(&target);
    let dataset = Dataset::indonesia().unwrap();

    let mut canvas = png_canvas(&config);
    let err = ChartRenderer::render_figure(&dataset, &config, &mut canvas).unwrap_err();
    match err {
        RenderError::Write { path, .. } => assert_eq!(path, target),
        other => panic!("expected write error, got {other:?}"),
    }
    assert!(!target.exists());
}

#[cfg(target_os = "linux")]
#[test]
fn full_device_is_a_write_error() {
    let config = RenderConfig {
        width: 400,
        height: 400,
        ..RenderConfig::default()
    }
    .with_output_path("/dev/full");
    let dataset = Dataset::indonesia().unwrap();

    let mut canvas = png_canvas(&config);
    let err = ChartRenderer::render_figure(&dataset, &config, &mut canvas).unwrap_err();
    match err {
        RenderError::Write { path, source } => {
            assert_eq!(path, std::path::PathBuf::from("/dev/full"));
            // ENOSPC
            assert_eq!(source.raw_os_error(), Some(28));
        }
        other => panic!("expected write error, got {other:?}"),
    }
}

#[test]
fn binary_saves_figure_and_confirms() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_trend_estimator"))
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim_end(), "Figure saved as 'hasil_estimasi.png'");
    assert!(
        output.stderr.is_empty(),
        "unexpected stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written = dir.path().join("hasil_estimasi.png");
    assert!(std::fs::metadata(&written).unwrap().len() > 0);
}

#[test]
fn binary_fails_when_output_is_unwritable() {
    let dir = tempfile::tempdir().unwrap();
    // A directory squatting on the output name makes the save fail.
    std::fs::create_dir(dir.path().join("hasil_estimasi.png")).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_trend_estimator"))
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("hasil_estimasi.png"), "stderr: {stderr}");
}
