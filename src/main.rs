// main.rs — 从 JSON 参数构建环境网格并输出顶点/UV 缓冲
//
// 用法:
//   panorama-environment [--config <file.json>] [--mode <Thirds|360>]
// 配置路径: --config > PANORAMA_ENV_CONFIG > 默认参数

use panorama_environment::{Environment, EnvironmentParameters, PanoramaMode, Result};
use std::path::PathBuf;
use std::process::ExitCode;

fn arg_value(name: &str) -> Option<String> {
    let mut it = std::env::args();
    while let Some(a) = it.next() {
        if a == name {
            return it.next();
        }
    }
    None
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Some(v) = arg_value("--config") {
        return Some(PathBuf::from(v));
    }

    if let Ok(v) = std::env::var("PANORAMA_ENV_CONFIG") {
        if !v.trim().is_empty() {
            return Some(PathBuf::from(v));
        }
    }

    None
}

fn run() -> Result<()> {
    let mut params = match resolve_config_path() {
        Some(path) => {
            log::info!("loading parameters from {}", path.display());
            EnvironmentParameters::load(&path)?
        }
        None => {
            log::info!("no config given, using default parameters");
            EnvironmentParameters::default()
        }
    };

    if let Some(mode) = arg_value("--mode") {
        params.panorama_mode = mode.parse::<PanoramaMode>()?;
    }

    let env = Environment::new(&params)?;
    log::info!(
        "built environment: {} mode, radius {}, length {}, height {}",
        params.panorama_mode,
        params.radius,
        params.length,
        params.height
    );

    println!("{}", serde_json::to_string_pretty(&env)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
