use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;

use asli::analysis::seasonal_means;
use asli::data::{
    MaskFile, StackFile, SyntheticConfig, antarctic_mask, monthly_stack, save_series_json,
};
use asli::domain::{LandSeaMask, SlpStack};
use asli::{Cli, calculate_with};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    let sector = args.sector()?;
    let options = args.options();

    // C. Data Loading
    let (stack, mask) = load_inputs(&args)?;
    let mut stack = stack.to_hpa();
    if args.season {
        stack = seasonal_means(&stack);
        log::info!("Aggregated into {} seasonal fields", stack.len());
    }

    // D. Calculation
    let series = calculate_with(&sector, &mask, &stack, &options)
        .with_context(|| format!("ASL calculation failed for sector {}", sector))?;

    // E. Output
    save_series_json(&args.output, &series)?;
    log::info!("Wrote {} rows to {}", series.len(), args.output.display());
    Ok(())
}

fn load_inputs(args: &Cli) -> Result<(SlpStack, LandSeaMask)> {
    let stack_path = args
        .stack
        .clone()
        .unwrap_or_else(|| StackFile::default_cache_path("monthly"));
    let mask_path = args.mask.clone().unwrap_or_else(MaskFile::default_cache_path);

    if stack_path.exists() && mask_path.exists() {
        return load_caches(&stack_path, &mask_path);
    }

    if !args.demo {
        bail!(
            "No input cache at {} / {} (run make_stack_cache or pass --demo)",
            stack_path.display(),
            mask_path.display()
        );
    }

    log::warn!("No input cache found, using synthetic demo fields");
    let stack = monthly_stack(&SyntheticConfig::default())?;
    let mask = antarctic_mask(&stack.grid)?;
    Ok((stack, mask))
}

fn load_caches(stack_path: &Path, mask_path: &Path) -> Result<(SlpStack, LandSeaMask)> {
    let stack = StackFile::load_from_path(stack_path)
        .with_context(|| format!("Failed to load pressure stack {:?}", stack_path))?
        .data;
    let mask = MaskFile::load_from_path(mask_path)
        .with_context(|| format!("Failed to load land-sea mask {:?}", mask_path))?
        .data;
    log::info!(
        "Loaded {} fields ({}) from {:?}",
        stack.len(),
        stack.unit,
        stack_path
    );
    Ok((stack, mask))
}
