//! Sampling and reset behavior, driving the decoder directly.

use std::cell::Cell;

use clicker::decode::{Decoder, Event, State};
use clicker::hw::{Line, Timer};
use clicker::{Consumer, Latch};

#[test]
fn latch_holds_most_recent_event() {
    let mut latch = Latch::new();
    assert_eq!(latch.take(), None);

    let press = Event {
        address: 0x0102,
        command: 0x35,
        repeat: false,
    };
    latch.accept(press);
    latch.accept(Event {
        repeat: true,
        ..press
    });

    assert_eq!(latch.take(), Some(Event { repeat: true, ..press }));
    assert_eq!(latch.take(), None);
}

#[test]
fn majority_vote_requires_all_oversamples() {
    let mut dec = Decoder::new();
    let mut timer = SimTimer::default();
    let line = SimLine(Cell::new(false));
    let mut sink = |_: Event| {};

    synchronize(&mut dec, &mut timer, &line);

    // Any dropout within the three oversamples of a slot forces a zero.
    let triples = [
        [true, true, false],
        [true, false, true],
        [false, true, true],
        [false, false, false],
        [true, true, true],
    ];
    for triple in triples {
        for level in triple {
            line.0.set(level);
            dec.tick(&mut timer, &line, &mut sink);
        }
    }

    assert_eq!(dec.bits_received(), 5);
    for slot in 0..4 {
        assert!(!dec.samples().get(slot));
    }
    assert!(dec.samples().get(4));
}

#[test]
fn reset_is_idempotent_from_any_state() {
    let line = SimLine(Cell::new(false));
    let mut events = 0;

    // Mid-synchronization, after the header mark has started.
    let mut dec = Decoder::new();
    let mut timer = SimTimer::default();
    line.0.set(true);
    dec.edge(&mut timer, &line, &mut |_: Event| {});
    assert_reset_clears(&mut dec, &mut timer);

    // Receiving, partway into a frame.
    let mut dec = Decoder::new();
    let mut timer = SimTimer::default();
    synchronize(&mut dec, &mut timer, &line);
    line.0.set(true);
    for _ in 0..7 {
        dec.tick(&mut timer, &line, &mut |_: Event| {});
    }
    assert_ne!(dec.bits_received(), 0);
    assert_reset_clears(&mut dec, &mut timer);

    // Waiting for repeats, after a complete valid frame.
    let mut dec = Decoder::new();
    let mut timer = SimTimer::default();
    synchronize(&mut dec, &mut timer, &line);
    feed_frame(&mut dec, &mut timer, &line, &mut |_: Event| events += 1);
    assert_eq!(dec.state(), State::WaitRepeat);
    assert_eq!(events, 1);
    assert_reset_clears(&mut dec, &mut timer);

    // Faulted, after a corrupt repeat burst.
    let mut dec = Decoder::new();
    let mut timer = SimTimer::default();
    synchronize(&mut dec, &mut timer, &line);
    feed_frame(&mut dec, &mut timer, &line, &mut |_: Event| {});
    line.0.set(true);
    timer.now = 1_000_000;
    dec.edge(&mut timer, &line, &mut |_: Event| {});
    line.0.set(false);
    timer.now += 5_000; // Far below the repeat pulse minimum.
    dec.edge(&mut timer, &line, &mut |_: Event| {});
    assert_reset_clears(&mut dec, &mut timer);
}

fn assert_reset_clears(dec: &mut Decoder, timer: &mut SimTimer) {
    dec.reset(timer);

    assert_eq!(*dec, Decoder::new());
    assert!(!timer.armed);
}

/// Walk the decoder through a nominal 9 ms / 4.5 ms header.
fn synchronize(dec: &mut Decoder, timer: &mut SimTimer, line: &SimLine) {
    let mut sink = |_: Event| {};

    line.0.set(true);
    timer.now = 0;
    dec.edge(timer, line, &mut sink);

    line.0.set(false);
    timer.now = 36_000;
    dec.edge(timer, line, &mut sink);

    line.0.set(true);
    timer.now = 54_000;
    dec.edge(timer, line, &mut sink);

    assert_eq!(dec.state(), State::ReceivingCommand);
}

/// Feed a valid frame's 96 raw slots as oversampled line readings.
fn feed_frame(
    dec: &mut Decoder,
    timer: &mut SimTimer,
    line: &SimLine,
    sink: &mut dyn FnMut(Event),
) {
    let word = 0x0102u32 | 0x35u32 << 16 | (!0x35u32 & 0xFF) << 24;

    let mut slots = Vec::new();
    for n in 0..32 {
        slots.push(true);
        slots.push(false);
        if word >> n & 1 == 1 {
            slots.extend([false, false]);
        }
    }
    slots.push(true);
    slots.resize(96, false);

    for slot in slots {
        for _ in 0..3 {
            line.0.set(slot);
            dec.tick(timer, line, &mut |e| sink(e));
        }
    }
}

/// A timer tracking only what these tests observe: the count origin and
/// whether it is armed.
#[derive(Default)]
struct SimTimer {
    now: u32,
    started: u32,
    armed: bool,
}

impl Timer for SimTimer {
    fn start_one_shot(&mut self, _ticks: u32) {
        self.started = self.now;
        self.armed = true;
    }

    fn start_continuous(&mut self, _interval: u32) {
        self.started = self.now;
        self.armed = true;
    }

    fn stop(&mut self) {
        self.armed = false;
    }

    fn counter(&self) -> u32 {
        self.now - self.started
    }
}

struct SimLine(Cell<bool>);

impl Line for SimLine {
    fn level(&self) -> bool {
        self.0.get()
    }
}
