use std::error::Error;

use clap::Args;
use frag_ana::EventReport;
use frag_core::EventSource;
use frag_gen::ToyStringSource;
use tracing::warn;

use crate::ConfigArgs;

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run(args: &InspectArgs) -> Result<(), Box<dyn Error>> {
    let mut config = args.config.resolve()?;
    if args.config.events.is_none() {
        config.events = 1;
    }

    let mut source = ToyStringSource::new(config.generator.clone())?;
    let partons = config.seed.partons();
    for event_index in 0..config.events {
        source.reset();
        for parton in &partons {
            source.append(parton);
        }
        if let Err(err) = source.generate_next() {
            warn!(event = event_index, error = %err, "event generation failed, skipping");
            continue;
        }
        let report = EventReport::new(
            event_index,
            source.event(),
            &config.resolver,
            config.string_energy(),
        );
        println!("{report}");
    }
    println!("{}", source.statistics());
    Ok(())
}
