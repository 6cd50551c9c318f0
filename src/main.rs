//! Normalize the keypoints of a stored task against a stage size.
//!
//! Usage: `keypoint-normalize <task.json> [STAGE_WIDTHxSTAGE_HEIGHT] [--appearance]`
//! or `keypoint-normalize --print-config`.
//!
//! The task file holds the natural image size and a list of stored results.
//! Results are loaded in percent space with the configured marker style, the
//! image is resized to the stage, and the re-serialized results are printed
//! as JSON. With `--appearance` the drawing inputs of each marker are printed
//! instead.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use keypoint_region::config::RegionConfig;

    let config = RegionConfig::load_from_default_path().unwrap_or_default();
    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map_or("keypoint-normalize", String::as_str);

    if args.iter().skip(1).any(|a| a == "--print-config") {
        match config.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let show_appearance = args.iter().skip(1).any(|a| a == "--appearance");
    let positional: Vec<&str> = args
        .iter()
        .skip(1)
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .collect();

    let Some(task_path) = positional.first() else {
        eprintln!("Usage: {} <task.json> [WIDTHxHEIGHT] [--appearance]", program);
        eprintln!("       {} --print-config", program);
        std::process::exit(2);
    };

    let output = if show_appearance {
        Output::Appearance
    } else {
        Output::Results
    };
    if let Err(e) = run(&config, task_path, positional.get(1).copied(), output) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(serde::Deserialize)]
struct Task {
    #[serde(default = "default_image_name")]
    image: String,
    natural_width: u32,
    natural_height: u32,
    results: Vec<keypoint_region::RegionResult>,
}

#[cfg(not(target_arch = "wasm32"))]
fn default_image_name() -> String {
    "image".to_string()
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Results,
    Appearance,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_stage(size: &str) -> Option<(f32, f32)> {
    let (w, h) = size.split_once('x')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

#[cfg(not(target_arch = "wasm32"))]
fn run(
    config: &keypoint_region::config::RegionConfig,
    task_path: &str,
    stage: Option<&str>,
    output: Output,
) -> Result<(), keypoint_region::RegionError> {
    use keypoint_region::{ImageObject, PointRegion, RegionError, Session};

    let json = std::fs::read_to_string(task_path)?;
    let task: Task = serde_json::from_str(&json)?;
    let natural = (task.natural_width, task.natural_height);

    let stage = match stage {
        Some(size) => parse_stage(size)
            .ok_or_else(|| RegionError::invalid_coordinates(format!("bad stage size '{}'", size)))?,
        None => (natural.0 as f32, natural.1 as f32),
    };

    let mut session = Session::new(ImageObject::new(task.image.as_str()));
    let mut ids = Vec::with_capacity(task.results.len());
    for result in &task.results {
        let region = config.defaults.apply(PointRegion::from_result(result, &task.image)?);
        ids.push(session.add_region(region));
    }
    session.update_image_size(natural, stage);
    log::info!("Normalized {} keypoints to stage {}x{}", ids.len(), stage.0, stage.1);

    match output {
        Output::Results => {
            let results = session.serialize_all()?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Output::Appearance => {
            let appearances = ids
                .iter()
                .map(|id| session.appearance(id, &config.highlight))
                .collect::<Result<Vec<_>, _>>()?;
            println!("{}", serde_json::to_string_pretty(&appearances)?);
        }
    }
    Ok(())
}

// WASM builds use the library only
#[cfg(target_arch = "wasm32")]
fn main() {}
