use std::error::Error;

use clap::Args;
use frag_ana::Preset;

#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Print the full configuration of one preset as YAML.
    #[arg(long, value_name = "NAME")]
    pub show: Option<String>,
}

pub fn run(args: &PresetsArgs) -> Result<(), Box<dyn Error>> {
    match &args.show {
        Some(name) => {
            let preset: Preset = name.parse()?;
            print!("{}", preset.config().to_yaml_string()?);
        }
        None => {
            for preset in Preset::ALL {
                println!("{:<14} {}", preset.name(), preset.description());
            }
        }
    }
    Ok(())
}
