use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod icon_gen;
mod render;

#[derive(Debug, Parser)]
#[clap(
    name = "codedrill-icons",
    about = "Generate the Code Drill browser extension PNG icon set"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "assets/icons")]
    output: PathBuf,

    /// Custom icon sizes to generate. When set, only these sizes are generated.
    #[clap(short, long, value_delimiter = ',', value_name = "SIZES")]
    sizes: Option<Vec<u32>>,

    /// The background color of the icons (CSS color format)
    #[clap(long, default_value = "#3B82F6")]
    primary: String,

    /// The gradient overlay color of the icons (CSS color format)
    #[clap(long, default_value = "#8B5CF6")]
    secondary: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    icon_gen::generate_icons(icon_gen::Args {
        output: args.output,
        sizes: args.sizes,
        primary: args.primary,
        secondary: args.secondary,
    })
}
