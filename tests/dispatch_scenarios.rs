use meritgrid::{calculate, AlwaysOn, Consumer, Dispatchable, Order, Reserve, Storage, HORIZON};

fn profile_with(values: &[(usize, f64)]) -> Vec<f64> {
    let mut profile = vec![0.0; HORIZON];
    for &(i, v) in values {
        profile[i] = v;
    }
    profile
}

// S1: single dispatchable, no always-on.
#[test]
fn single_dispatchable_no_always_on() {
    let mut order = Order::new();
    order.attach_consumer(
        Consumer::new("c1", profile_with(&[(0, 0.2), (1, 0.4), (2, 1.0)]), 2.0).unwrap(),
    );
    order.attach_dispatchable(Dispatchable::new("d1", 1.0, 0.5, 3.0));

    calculate(&mut order).unwrap();

    let loads: Vec<f64> = (0..4).map(|f| order.dispatchables()[0].load_at(f)).collect();
    assert_eq!(loads, vec![0.4, 0.8, 1.5, 0.0]);
}

// S2: two dispatchables dispatched in merit (cost) order.
#[test]
fn two_dispatchables_merit_order() {
    let mut order = Order::new();
    order.attach_consumer(
        Consumer::new("c1", profile_with(&[(0, 0.2), (1, 0.4), (2, 0.8)]), 2.0).unwrap(),
    );
    order.attach_dispatchable(Dispatchable::new("d1", 2.0, 0.5, 2.0));
    order.attach_dispatchable(Dispatchable::new("d2", 1.0, 0.5, 2.0));

    calculate(&mut order).unwrap();

    let d1 = order.dispatchables().iter().find(|d| d.id == "d1").unwrap();
    let d2 = order.dispatchables().iter().find(|d| d.id == "d2").unwrap();

    let expected = [
        (0.0, 0.4, "d2"),
        (0.0, 0.8, "d2"),
        (0.6, 1.0, "d1"),
        (0.0, 0.0, "d2"),
    ];

    for (frame, (d1_load, d2_load, setter)) in expected.into_iter().enumerate() {
        assert_eq!(d1.load_at(frame), d1_load, "d1 at frame {frame}");
        assert_eq!(d2.load_at(frame), d2_load, "d2 at frame {frame}");
        assert_eq!(order.price_setter_at(frame).unwrap().id, setter, "setter at frame {frame}");
    }
}

// S3: always-on output consumed before dispatchable.
#[test]
fn always_on_reduces_dispatchable_load() {
    let mut order = Order::new();
    order.attach_consumer(
        Consumer::new("c1", profile_with(&[(0, 0.2), (1, 0.4), (2, 1.0)]), 2.0).unwrap(),
    );
    order.attach_always_on(AlwaysOn::new("solar", vec![0.5; HORIZON], 1.0).unwrap());
    order.attach_dispatchable(Dispatchable::new("d1", 1.0, 0.5, 3.0));

    calculate(&mut order).unwrap();

    let loads: Vec<f64> = (0..4).map(|f| order.dispatchables()[0].load_at(f)).collect();
    assert_eq!(loads, vec![0.0, 0.3, 1.5, 0.0]);
}

// S4: always-on excess is absorbed by storage, then discharged back out
// ahead of the dispatchable.
#[test]
fn storage_absorbs_always_on_excess_then_discharges() {
    let mut order = Order::new();
    order.attach_consumer(
        Consumer::new("c1", profile_with(&[(0, 1.5), (1, 1.0), (2, 0.5), (3, 2.0)]), 1.0).unwrap(),
    );
    order.attach_always_on(AlwaysOn::new("solar", vec![1.0; HORIZON], 1.0).unwrap());
    order.attach_dispatchable(Dispatchable::new("d1", 1.0, 0.5, 1.0));
    order.attach_flex(Box::new(Storage::new("batt", 2.0, 1.0, Reserve::without_decay(5.0))));

    calculate(&mut order).unwrap();

    let storage = order.flexibles().iter().find(|f| f.id() == "batt").unwrap();
    let loads: Vec<f64> = (0..4).map(|f| storage.load_at(f)).collect();
    assert_eq!(loads, vec![0.0, 0.0, -0.5, 0.5]);
}

// S5: a reserve's volume caps repeated deposits.
#[test]
fn reserve_volume_caps_repeated_deposits() {
    let mut reserve = Reserve::without_decay(2.0);

    let cases = [(1.0, 1.0), (1.0, 2.0), (1.0, 2.0), (1.0, 2.0)];
    for (amount, expected_stored) in cases {
        reserve.add(0, amount);
        assert_eq!(reserve.at(0), expected_stored);
    }
}

// S6: decay carries through untouched frames, clamped to what is available.
#[test]
fn reserve_decay_clamps_through_untouched_frames() {
    let mut reserve = Reserve::new(10.0, |_frame, _stored| 2.0);
    reserve.add(0, 3.0);

    assert_eq!(reserve.at(1), 1.0);
    assert_eq!(reserve.at(2), 0.0);
    assert_eq!(reserve.at(3), 0.0);
}
