// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Power and zone handling against a recording dispatcher.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{RecordingDispatcher, assert_spaced, controller_with};
use remolight::{Error, LightState, Phase, SignalClass, Zone, ZoneEvent};

fn powered(zone: Zone) -> LightState {
    let mut state = LightState::new();
    state.set_power(true);
    state.set_zone(zone);
    state
}

#[tokio::test(start_paused = true)]
async fn power_on_from_off_lights_both_zones() {
    let (controller, dispatcher, store) =
        controller_with(RecordingDispatcher::new(), LightState::new());

    controller.set_power(true).await;

    assert_eq!(dispatcher.signals(), vec![SignalClass::Power]);
    assert!(controller.power());
    assert!(controller.main_on());
    assert!(controller.upper_on());
    assert_eq!(store.snapshot().map(|s| s.zone()), Some(Zone::Both));
}

#[tokio::test(start_paused = true)]
async fn main_off_from_both_sends_two_spaced_points() {
    let (controller, dispatcher, _store) =
        controller_with(RecordingDispatcher::new(), powered(Zone::Both));

    let t = controller.transition(ZoneEvent::MainOff).await.unwrap();

    assert_eq!(t.to, Phase::UpperOnly);
    assert_eq!(dispatcher.signals(), vec![SignalClass::Point, SignalClass::Point]);
    assert_spaced(&dispatcher.instants());
    assert!(!controller.main_on());
    assert!(controller.upper_on());
}

#[tokio::test(start_paused = true)]
async fn upper_off_from_both_sends_one_point() {
    let (controller, dispatcher, _store) =
        controller_with(RecordingDispatcher::new(), powered(Zone::Both));

    controller.set_upper(false).await;

    assert_eq!(dispatcher.signals(), vec![SignalClass::Point]);
    assert_eq!(controller.state().zone(), Zone::Main);
}

#[tokio::test(start_paused = true)]
async fn repeated_main_on_sends_nothing() {
    for zone in [Zone::Both, Zone::Main] {
        let (controller, dispatcher, _store) =
            controller_with(RecordingDispatcher::new(), powered(zone));

        controller.set_main(true).await;
        controller.set_main(true).await;

        assert!(dispatcher.signals().is_empty(), "zone {zone}");
        assert_eq!(controller.state().zone(), zone);
    }
}

#[tokio::test(start_paused = true)]
async fn switching_off_last_zone_powers_down() {
    let (controller, dispatcher, _store) =
        controller_with(RecordingDispatcher::new(), powered(Zone::Upper));

    controller.set_upper(false).await;

    assert_eq!(dispatcher.signals(), vec![SignalClass::Power]);
    assert!(!controller.power());
    assert!(!controller.upper_on());
    // The zone is kept while off.
    assert_eq!(controller.state().zone(), Zone::Upper);
}

#[tokio::test(start_paused = true)]
async fn zone_switches_ignored_while_off() {
    let (controller, dispatcher, _store) =
        controller_with(RecordingDispatcher::new(), LightState::new());

    controller.set_main(true).await;
    controller.set_upper(false).await;
    controller.set_power(false).await;

    assert!(dispatcher.signals().is_empty());
    assert!(!controller.power());
}

#[tokio::test(start_paused = true)]
async fn full_cycle_pulse_sequence() {
    let (controller, dispatcher, _store) =
        controller_with(RecordingDispatcher::new(), LightState::new());

    controller.set_power(true).await;
    controller.set_main(false).await;
    controller.set_main(true).await;
    controller.set_upper(false).await;
    controller.set_main(false).await;

    assert_eq!(
        dispatcher.signals(),
        vec![
            SignalClass::Power,
            SignalClass::Point,
            SignalClass::Point,
            SignalClass::Point,
            SignalClass::Point,
            SignalClass::Power,
        ]
    );
    assert!(!controller.power());
}

#[tokio::test(start_paused = true)]
async fn failure_on_second_pulse_leaves_zone_unchanged() {
    let (controller, dispatcher, store) =
        controller_with(RecordingDispatcher::new().fail_on(2), powered(Zone::Both));

    let err = controller.transition(ZoneEvent::MainOff).await.unwrap_err();

    assert!(matches!(err, Error::Dispatch(_)));
    assert_eq!(dispatcher.calls(), 2);
    assert_eq!(dispatcher.signals(), vec![SignalClass::Point]);
    assert_eq!(controller.state().zone(), Zone::Both);
    assert!(controller.main_on());
    assert_eq!(store.snapshot(), Some(powered(Zone::Both)));
}

#[tokio::test(start_paused = true)]
async fn concurrent_transitions_do_not_interleave() {
    let (controller, dispatcher, _store) =
        controller_with(RecordingDispatcher::new(), powered(Zone::Both));
    let other = controller.clone();

    let (first, second) = tokio::join!(
        controller.transition(ZoneEvent::MainOff),
        other.transition(ZoneEvent::UpperOff),
    );

    assert_eq!(first.unwrap().to, Phase::UpperOnly);
    assert_eq!(second.unwrap().to, Phase::Off);
    assert_eq!(
        dispatcher.signals(),
        vec![SignalClass::Point, SignalClass::Point, SignalClass::Power]
    );
    assert!(!controller.power());
}

#[tokio::test(start_paused = true)]
async fn every_handler_publishes() {
    let (controller, _dispatcher, _store) =
        controller_with(RecordingDispatcher::new().fail_on(1), LightState::new());
    let published = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&published);
    let id = controller.on_published(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    // Failed, then committed, then a no-op.
    controller.set_power(true).await;
    controller.set_power(true).await;
    controller.set_power(true).await;
    assert_eq!(published.load(Ordering::SeqCst), 3);
    assert!(controller.power());

    assert!(controller.unsubscribe(id));
    controller.set_power(false).await;
    assert_eq!(published.load(Ordering::SeqCst), 3);
}
