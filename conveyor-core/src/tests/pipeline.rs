use crate::{ConsumerOutcome, Pipeline, ProducerOutcome, TransformError, TransformErrorPolicy};

#[test]
fn single_producer_single_consumer_preserves_order() {
    let report = Pipeline::builder(2).source(vec![1, 2, 3, 4, 5]).run();

    assert_eq!(report.items, vec![1, 2, 3, 4, 5]);
    assert_eq!(report.producers, vec![ProducerOutcome::Finished { sent: 5 }]);
    assert_eq!(
        report.consumers,
        vec![ConsumerOutcome::Finished {
            delivered: 5,
            skipped: 0
        }]
    );
}

#[test]
fn transform_is_applied_to_every_item() {
    let report = Pipeline::builder(10)
        .source(vec![1, 2, 3])
        .transform(|x: i32| Ok(x * 2))
        .run();

    assert_eq!(report.items, vec![2, 4, 6]);
}

/// No item loss: the multiset delivered across all consumers equals the
/// union of all producer sources, for N producers × K items × M consumers.
#[test]
fn fan_in_fan_out_loses_nothing() {
    let producers = 4;
    let items_per_producer = 25;

    let mut builder = Pipeline::builder(4).consumers(3);
    let mut expected = Vec::new();
    for p in 0..producers {
        let source: Vec<i32> = (0..items_per_producer)
            .map(|i| p * 1_000 + i)
            .collect();
        expected.extend_from_slice(&source);
        builder = builder.source(source);
    }

    let report = builder.run();

    assert_eq!(report.delivered(), expected.len());
    let mut items = report.items;
    items.sort_unstable();
    expected.sort_unstable();
    assert_eq!(items, expected);

    // Clean shutdown: every worker reached its normal terminal state.
    for outcome in &report.producers {
        assert!(matches!(outcome, ProducerOutcome::Finished { .. }));
    }
    for outcome in &report.consumers {
        assert!(matches!(outcome, ConsumerOutcome::Finished { .. }));
    }
}

#[test]
fn each_producer_preserves_its_own_order() {
    let report = Pipeline::builder(3)
        .source((0..100).map(|i| ("p0", i)).collect::<Vec<_>>())
        .source((0..100).map(|i| ("p1", i)).collect::<Vec<_>>())
        .run();

    for name in ["p0", "p1"] {
        let own: Vec<i32> = report
            .items
            .iter()
            .filter(|(p, _)| *p == name)
            .map(|&(_, i)| i)
            .collect();
        assert_eq!(own, (0..100).collect::<Vec<_>>(), "{name} out of order");
    }
}

#[test]
fn skip_policy_reports_skips_in_outcomes() {
    let report = Pipeline::builder(4)
        .source(vec![1, 2, 3, 4, 5, 6])
        .consumers(2)
        .transform(|x: i32| {
            if x % 3 == 0 {
                Err(TransformError::new("multiple of three"))
            } else {
                Ok(x)
            }
        })
        .on_transform_error(TransformErrorPolicy::Skip)
        .run();

    let skipped: usize = report
        .consumers
        .iter()
        .map(|outcome| match outcome {
            ConsumerOutcome::Finished { skipped, .. } => *skipped,
            other => panic!("expected finished, got {other:?}"),
        })
        .sum();
    assert_eq!(skipped, 2);

    let mut items = report.items;
    items.sort_unstable();
    assert_eq!(items, vec![1, 2, 4, 5]);
}

/// A halting transform must not wedge `run()`: with capacity 1 and more
/// items than the consumer ever accepts, the producer parks in `put` and
/// only the failed consumer's shutdown can release it.
#[test]
fn halt_failure_releases_a_parked_producer() {
    let report = Pipeline::builder(1)
        .source(vec![1, 2, 3])
        .transform(|_: i32| Err(TransformError::new("always fails")))
        .on_transform_error(TransformErrorPolicy::Halt)
        .run();

    assert!(report.items.is_empty());
    assert!(matches!(
        report.consumers[0],
        ConsumerOutcome::Failed { delivered: 0, .. }
    ));
    match &report.producers[0] {
        ProducerOutcome::ClosedEarly { sent, dropped } => {
            assert!(*sent <= 2);
            assert_eq!(*dropped, 1);
        }
        ProducerOutcome::Stopped { sent } => assert!(*sent <= 2),
        other => panic!("producer should have been cut short, got {other:?}"),
    }
}

#[test]
#[should_panic(expected = "pipeline needs at least one source")]
fn pipeline_without_sources_panics() {
    let _ = Pipeline::builder::<i32>(2).run();
}
