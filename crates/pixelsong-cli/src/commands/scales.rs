//! Scales command implementation
//!
//! Prints the scale pool a given seed produces, so a render run can be
//! inspected without producing audio.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use pixelsong_core::ScalePool;

use super::json_output::{JsonError, ScalesOutput};

/// Run the scales command
///
/// # Arguments
/// * `seed` - Base seed the pool is derived from
/// * `pool_size` - Number of scales to build
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(seed: u32, pool_size: usize, json_output: bool) -> Result<ExitCode> {
    if json_output {
        let (output, code) = match ScalePool::from_seed(seed, pool_size) {
            Ok(pool) => (
                ScalesOutput::success(seed, pool.iter().cloned().collect()),
                ExitCode::SUCCESS,
            ),
            Err(e) => (
                ScalesOutput::failure(seed, JsonError::new(e.code(), e.to_string())),
                ExitCode::from(1),
            ),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(code);
    }

    let pool = ScalePool::from_seed(seed, pool_size).context("Failed to build scale pool")?;

    println!(
        "{} {} scales from seed {}",
        "Scale pool:".cyan().bold(),
        pool.len(),
        seed
    );
    for (index, scale) in pool.iter().enumerate() {
        let semitones = scale
            .semitones
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "  {:>3} {:<18} {} [{}]",
            index.to_string().dimmed(),
            scale.template,
            format!("+{}", scale.offset).yellow(),
            semitones
        );
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_json_shape() {
        let pool = ScalePool::from_seed(5, 3).unwrap();
        let output = ScalesOutput::success(5, pool.iter().cloned().collect());
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["success"], true);
        assert!(value.get("errors").is_none());
        assert_eq!(value["seed"], 5);
        assert_eq!(value["scales"].as_array().unwrap().len(), 3);
        assert!(value["scales"][0]["semitones"].is_array());
        assert!(value["scales"][0]["template"].is_string());
    }

    #[test]
    fn test_zero_pool_size_fails() {
        assert!(run(1, 0, false).is_err());
    }

    #[test]
    fn test_zero_pool_size_json_reports_failure() {
        let code = run(1, 0, true).unwrap();
        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::from(1)));

        let err = ScalePool::from_seed(1, 0).unwrap_err();
        let output = ScalesOutput::failure(1, JsonError::new(err.code(), err.to_string()));
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["errors"][0]["code"], err.code());
        assert_eq!(value["scales"].as_array().unwrap().len(), 0);
    }
}
