use jsonreach::harness::{Config, Harness, NoopCounter};
use jsonreach::{check_agreement, report, Strategy, FIXTURE, PATH};

#[test]
fn every_strategy_reaches_cool_obj() {
    assert_eq!(PATH, "$.item1[2].some.thing");
    for strategy in Strategy::ALL {
        println!("Testing {strategy}");
        assert_eq!(strategy.extract(FIXTURE).unwrap(), "coolObj");
    }
    assert_eq!(check_agreement(FIXTURE).unwrap(), "coolObj");
}

#[test]
fn report_lists_strategies_in_order() {
    let harness = Harness::new(Config::default(), NoopCounter);
    let runs = Strategy::ALL
        .into_iter()
        .map(|strategy| {
            harness
                .run_iterations(strategy.label(), 16, || strategy.extract(FIXTURE))
                .unwrap()
        })
        .collect::<Vec<_>>();

    let mut out = Vec::new();
    report::write_all(&mut out, &runs).unwrap();
    let out = String::from_utf8(out).unwrap();

    let blocks = out
        .split("\n\n")
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>();
    assert_eq!(blocks.len(), 3, "{out}");
    for (block, label) in blocks
        .iter()
        .zip(["library-path", "dynamic-unmarshal", "typed-unmarshal"])
    {
        let mut lines = block.lines();
        assert_eq!(lines.next(), Some(label));
        assert!(lines.next().unwrap().contains("16 iterations"));
        assert!(lines.next().unwrap().starts_with("allocations: "));
        assert!(lines.next().unwrap().starts_with("bytes: "));
        assert_eq!(lines.next(), None);
    }
}
