use anyhow::{Context, Result};
use asli::config::ASL_REGION;
use asli::data::synthetic::{SyntheticConfig, antarctic_mask, monthly_stack};
use asli::data::{MaskFile, StackFile};

fn main() -> Result<()> {
    build_demo_cache()
}

fn build_demo_cache() -> Result<()> {
    let config = SyntheticConfig::default();
    let stack = monthly_stack(&config).context("Failed to build synthetic stack")?;
    let mask = antarctic_mask(&stack.grid).context("Failed to build land-sea mask")?;

    println!(
        "Built {} monthly fields from {} on a {:?} grid (request area {})",
        stack.len(),
        config.first_year,
        stack.grid.shape(),
        ASL_REGION.request_area()
    );

    let stack_path = StackFile::default_cache_path("monthly");
    StackFile::new(stack).save_to_path(&stack_path)?;

    let mask_path = MaskFile::default_cache_path();
    let ocean_cells = mask.ocean_cell_count();
    MaskFile::new(mask).save_to_path(&mask_path)?;

    println!(
        "✅ Demo cache written to {:?} and {:?} ({} ocean cells).",
        stack_path, mask_path, ocean_cells
    );
    Ok(())
}
