use crate::color::HexColor;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

const AFTER_HELP: &str = "\
EXAMPLES:
  icon-helper test \"#ff6b35\" --label \"TEST\"
  icon-helper local \"#9b59b6\" --label \"LOCAL\"
  icon-helper demo \"#3498db\"
  icon-helper qa \"#e67e22\" --no-label
  icon-helper test \"#ff6b35\" --output-dir \"/custom/path/icons\"

COMMON COLORS:
  Orange:     #ff6b35   Purple:     #9b59b6
  Blue:       #3498db   Teal:       #1abc9c
  Yellow:     #f39c12   Pink:       #e91e63
  Brown:      #8d6e63   Indigo:     #673ab7

OUTPUT:
  Default:    <icon-dir>/<environment>/
  With label: <icon-dir>/<environment>-labeled/
  Custom:     --output-dir specifies the exact path";

#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Create environment icon sets with custom colors and optional labels",
    after_help = AFTER_HELP,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Environment name (e.g. test, local, demo, qa)
    pub environment: String,

    /// Background color in hex format (e.g. #ff6b35)
    pub color: String,

    /// Add environment label text (e.g. "TEST", "LOCAL")
    #[arg(long, conflicts_with = "no_label")]
    pub label: Option<String>,

    /// Explicitly specify no label (default)
    #[arg(long)]
    pub no_label: bool,

    /// Custom output directory (overrides default path logic)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Root of the icon tree holding the source and generated sets
    #[arg(long, value_name = "DIR", default_value = "public/img/icon")]
    pub icon_dir: PathBuf,

    /// Directory of original icons [default: <icon-dir>/dev]
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Render labels with the built-in bitmap font instead of system fonts
    #[arg(long)]
    pub builtin_font: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything a batch run needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub environment: String,
    pub color: HexColor,
    pub label: Option<String>,
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Plan {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let color = HexColor::parse(&cli.color)?;
        let label = cli
            .label
            .as_ref()
            .filter(|l| !l.trim().is_empty())
            .cloned();

        let output_dir = match (&cli.output_dir, &label) {
            (Some(dir), _) => dir.clone(),
            (None, Some(_)) => cli.icon_dir.join(format!("{}-labeled", cli.environment)),
            (None, None) => cli.icon_dir.join(&cli.environment),
        };

        let source_dir = cli
            .source
            .clone()
            .unwrap_or_else(|| cli.icon_dir.join("dev"));

        Ok(Self {
            environment: cli.environment.clone(),
            color,
            label,
            source_dir,
            output_dir,
        })
    }

    /// Value to put in `VITE_ICON_PATH` to pick up the generated set.
    pub fn icon_path_hint(&self) -> String {
        match self.label {
            Some(_) => format!("{}-labeled", self.environment),
            None => self.environment.clone(),
        }
    }
}
