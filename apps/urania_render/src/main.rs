use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Deserialize;
use urania::chart::{
    Appearance, ChartContext, ChartSettings, ChartVariant, RenderFeatures, Subject, SubjectData,
    ThemeStyle,
};
use urania::template::{render_svg, Template};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a horoscope wheel to SVG")]
struct Args {
    #[arg(help = "Path to the chart request (JSON)")]
    request: PathBuf,

    #[arg(long, value_parser = parse_style, help = "Colour theme: dark or bright")]
    style: Option<ThemeStyle>,

    #[arg(long, help = "Settings file (.toml or .json) replacing the built-in theme")]
    settings: Option<PathBuf>,

    #[arg(long, help = "Template with $slot placeholders")]
    template: Option<PathBuf>,

    #[arg(long, short, help = "Output file; stdout when omitted")]
    out: Option<PathBuf>,
}

fn parse_style(value: &str) -> std::result::Result<ThemeStyle, String> {
    match value.to_ascii_lowercase().as_str() {
        "dark" => Ok(ThemeStyle::Dark),
        "bright" | "light" => Ok(ThemeStyle::Bright),
        other => Err(format!("unknown style '{}'", other)),
    }
}

/// One render job as read from disk.
#[derive(Debug, Deserialize)]
struct ChartRequest {
    variant: ChartVariant,
    primary: SubjectData,
    #[serde(default)]
    secondary: Option<SubjectData>,
    #[serde(default)]
    appearance: Appearance,
    #[serde(default)]
    features: RenderFeatures,
}

fn load_settings(path: Option<&Path>, style: ThemeStyle) -> Result<ChartSettings> {
    let Some(path) = path else {
        return Ok(ChartSettings::for_style(style));
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading settings {}", path.display()))?;
    let settings = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => ChartSettings::from_json_str(&text),
        _ => ChartSettings::from_toml_str(&text),
    }
    .with_context(|| format!("loading settings {}", path.display()))?;
    Ok(settings)
}

fn load_template(path: Option<&Path>) -> Result<Template> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading template {}", path.display()))?;
            Template::parse(&text).with_context(|| format!("parsing template {}", path.display()))
        }
        None => Template::bundled().context("parsing bundled template"),
    }
}

fn render(args: &Args) -> Result<String> {
    let text = fs::read_to_string(&args.request)
        .with_context(|| format!("reading request {}", args.request.display()))?;
    let request: ChartRequest = serde_json::from_str(&text).context("parsing chart request")?;

    let style = args.style.unwrap_or(request.appearance.style);
    let settings = load_settings(args.settings.as_deref(), style)?;
    let template = load_template(args.template.as_deref())?;

    let primary = Subject::from_data(&request.primary, &settings)?;
    let secondary = request
        .secondary
        .as_ref()
        .map(|data| Subject::from_data(data, &settings))
        .transpose()?;

    let ctx = ChartContext::new(
        request.variant,
        primary,
        secondary,
        &settings,
        request.appearance,
    )?
    .with_features(request.features);
    Ok(render_svg(&ctx, &template)?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let svg = render(&args)?;
    match &args.out {
        Some(path) => {
            fs::write(path, &svg).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {} ({} bytes)", path.display(), svg.len());
        }
        None => println!("{}", svg),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const REQUEST: &str = include_str!("../../../demos/natal.json");

    fn args_for(request: &Path) -> Args {
        Args {
            request: request.to_path_buf(),
            style: None,
            settings: None,
            template: None,
            out: None,
        }
    }

    #[test]
    fn test_renders_demo_request() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(REQUEST.as_bytes()).unwrap();

        let svg = render(&args_for(file.path())).unwrap();
        assert!(svg.contains("<svg"));
        assert!(!svg.contains('"'));
    }

    #[test]
    fn test_toml_settings_override() {
        let dir = tempfile::tempdir().unwrap();
        let request = dir.path().join("natal.json");
        fs::write(&request, REQUEST).unwrap();
        let settings = dir.path().join("theme.toml");
        fs::write(&settings, "rulership_bonus = 0.0\n").unwrap();

        let mut args = args_for(&request);
        args.settings = Some(settings);
        args.style = Some(ThemeStyle::Bright);
        assert!(render(&args).is_ok());
    }

    #[test]
    fn test_transit_without_partner_fails() {
        let mut value: serde_json::Value = serde_json::from_str(REQUEST).unwrap();
        value["variant"] = serde_json::Value::String("Transit".to_string());
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(value.to_string().as_bytes()).unwrap();

        let err = render(&args_for(file.path())).unwrap_err();
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_parse_style() {
        assert_eq!(parse_style("Bright"), Ok(ThemeStyle::Bright));
        assert!(parse_style("sepia").is_err());
    }
}
