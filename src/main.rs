use std::alloc::System;
use std::hint::black_box;
use std::io;

use jsonreach::harness::{Config, Harness, StatsCounter};
use jsonreach::{check_agreement, report, Strategy, FIXTURE};
use log::{error, info};
use stats_alloc::{StatsAlloc, INSTRUMENTED_SYSTEM};

#[global_allocator]
static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let expected = check_agreement(FIXTURE).map_err(|err| {
        error!("strategies do not agree on the fixture: {err}");
        err
    })?;
    info!("every strategy resolved {expected:?}");

    let harness = Harness::new(Config::default(), StatsCounter);
    let mut stdout = io::stdout().lock();
    for strategy in Strategy::ALL {
        info!("benchmarking {strategy}");
        let stats = harness
            .run(strategy.label(), || strategy.extract(black_box(FIXTURE)))
            .map_err(|err| {
                error!("{strategy} aborted: {err}");
                err
            })?;
        report::write_all(&mut stdout, [&stats])?;
    }

    Ok(())
}
