use anyhow::Result;
use gcode_surface_fit::cli::run;

fn main() -> Result<()> {
    run()
}
