use crate::cli::Plan;
use anyhow::{Context, Result, bail};
use image::{ImageFormat, ImageReader};
use image_effect::{Effect, FontResolver, LabelConfig, LabelEffect, RecolorConfig};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Outcome of a whole batch.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.succeeded == self.total
    }
}

/// PNG files directly inside `dir`, sorted by file name.
pub fn discover_icons(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Source icons directory not found: {}", dir.display());
    }

    let mut icons = vec![];
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("read {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let is_png = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));

        if is_png {
            icons.push(entry.into_path());
        }
    }

    if icons.is_empty() {
        bail!("No PNG files found in {}", dir.display());
    }

    icons.sort();
    Ok(icons)
}

/// Recolor one icon, optionally stamp its label, and write it as PNG.
pub fn process_icon(
    input: &Path,
    output: &Path,
    recolor: &RecolorConfig,
    label: Option<&dyn Effect>,
) -> Result<()> {
    let image = ImageReader::open(input)
        .with_context(|| format!("open {}", input.display()))?
        .with_guessed_format()?
        .decode()
        .with_context(|| format!("decode {}", input.display()))?
        .to_rgba8();

    let mut image = recolor.apply(image)?;
    if let Some(label) = label {
        image = label.apply(image)?;
    }

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }

    image
        .save_with_format(output, ImageFormat::Png)
        .with_context(|| format!("save {}", output.display()))?;

    Ok(())
}

/// Process every icon in the plan's source directory.
///
/// A missing or empty source directory aborts the run; failures on single
/// files are recorded and the batch moves on.
pub fn run_batch<R: FontResolver>(plan: &Plan, resolver: R) -> Result<BatchSummary> {
    let icons = discover_icons(&plan.source_dir)?;

    println!("Creating {} environment icons...", plan.environment);
    println!("Source: {}", plan.source_dir.display());
    println!("Target: {}", plan.output_dir.display());
    println!("Color: {}", plan.color);
    println!("Label: {}", plan.label.as_deref().unwrap_or("None"));
    println!("Icons to process: {}", icons.len());
    println!("{}", "-".repeat(50));

    let recolor = RecolorConfig::new().with_target(plan.color.rgb());
    let label = plan
        .label
        .as_ref()
        .map(|text| LabelEffect::new(LabelConfig::new(text.as_str()), resolver));

    let mut summary = BatchSummary {
        total: icons.len(),
        ..Default::default()
    };

    for input in icons {
        let Some(name) = input.file_name() else {
            continue;
        };
        let output = plan.output_dir.join(name);

        println!("Processing {}", name.to_string_lossy());
        match process_icon(
            &input,
            &output,
            &recolor,
            label.as_ref().map(|l| l as &dyn Effect),
        ) {
            Ok(()) => {
                summary.succeeded += 1;
                println!("  ✓ Saved {}", output.display());
            }
            Err(e) => {
                log::warn!("process {} failed: {e:?}", input.display());
                println!("  ✗ Error processing {}: {e:#}", input.display());
                summary.failures.push((input, format!("{e:#}")));
            }
        }
    }

    println!("{}", "-".repeat(50));
    println!(
        "✓ Successfully processed {}/{} icons",
        summary.succeeded, summary.total
    );
    println!("✓ Environment icons saved to: {}", plan.output_dir.display());

    if summary.is_complete() {
        println!(
            "\nComplete! Your {} environment icons are ready.",
            plan.environment
        );
        println!("\nTo use these icons, update your environment variables:");
        println!("  VITE_ICON_PATH={}", plan.icon_path_hint());
    } else {
        println!("\n⚠ Some icons failed to process. Check error messages above.");
    }

    Ok(summary)
}
