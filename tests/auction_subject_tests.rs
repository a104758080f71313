use live_auction::domain::{AuctionStatus, FnObserver, ObserverError};
use std::sync::{Arc, Mutex};
#[path="utils/mod.rs"] mod utils;
use utils::*;

#[test]
fn new_subject_starts_active_at_starting_bid() {
    let subject = sample_subject();
    let state = subject.get_state();

    assert_eq!(state.item_name, sample_item_name());
    assert_eq!(state.starting_bid, sample_starting_bid());
    assert_eq!(state.current_bid, sample_starting_bid());
    assert_eq!(state.highest_bidder, None);
    assert_eq!(state.status, AuctionStatus::Active);
    assert_eq!(subject.observer_count(), 0);
}

#[test]
fn get_state_has_no_side_effects() {
    let mut subject = sample_subject();
    let observer = RecordingObserver::new();
    subject.attach("view", observer.boxed());

    let first = subject.get_state();
    let second = subject.get_state();

    assert_eq!(first, second);
    assert_eq!(observer.count(), 1);
}

#[test]
fn attach_notifies_once_with_current_state() {
    let mut subject = sample_subject();
    subject.place_bid("Alice", usd(55));
    let observer = RecordingObserver::new();

    subject.attach("view", observer.boxed());

    assert_eq!(observer.count(), 1);
    assert_eq!(observer.last(), Some(subject.get_state()));
    assert!(subject.is_attached("view"));
}

#[test]
fn attaching_the_same_id_twice_is_a_no_op() {
    let mut subject = sample_subject();
    let first = RecordingObserver::new();
    let second = RecordingObserver::new();

    subject.attach("view", first.boxed());
    subject.attach("view", second.boxed());

    assert_eq!(first.count(), 1);
    assert_eq!(second.count(), 0);
    assert_eq!(subject.observer_count(), 1);

    // The original registration is the one that keeps receiving updates
    subject.place_bid("Alice", usd(55));
    assert_eq!(first.count(), 2);
    assert_eq!(second.count(), 0);
}

#[test]
fn detached_observer_is_never_notified_again() {
    let mut subject = sample_subject();
    let observer = RecordingObserver::new();
    subject.attach("view", observer.boxed());

    subject.detach("view");
    subject.place_bid("Alice", usd(55));
    subject.advance_phase_status(AuctionStatus::GoingOnce);
    subject.mark_sold();
    subject.reset();

    assert_eq!(observer.count(), 1);
    assert!(!subject.is_attached("view"));
}

#[test]
fn detach_of_unknown_id_is_a_no_op() {
    let mut subject = sample_subject();
    let observer = RecordingObserver::new();
    subject.attach("view", observer.boxed());

    subject.detach("somebody-else");

    assert_eq!(subject.observer_count(), 1);
    assert_eq!(observer.count(), 1);
}

#[test]
fn accepted_bid_updates_state_and_broadcasts() {
    let mut subject = sample_subject();
    let observer = RecordingObserver::new();
    subject.attach("view", observer.boxed());

    assert!(subject.place_bid("Alice", usd(55)));

    let state = subject.get_state();
    assert_eq!(state.current_bid, usd(55));
    assert_eq!(state.highest_bidder, Some("Alice".to_string()));
    assert_eq!(state.status, AuctionStatus::Active);
    assert_eq!(observer.count(), 2);
    assert_eq!(observer.last(), Some(state));
}

#[test]
fn lower_bid_is_rejected_without_broadcast() {
    let mut subject = sample_subject();
    subject.place_bid("Alice", usd(55));
    let observer = RecordingObserver::new();
    subject.attach("view", observer.boxed());
    let before = subject.get_state();

    assert!(!subject.place_bid("Bob", usd(40)));

    assert_eq!(subject.get_state(), before);
    assert_eq!(observer.count(), 1);
}

#[test]
fn equal_bid_is_rejected() {
    let mut subject = sample_subject();

    assert!(!subject.place_bid("Bob", sample_starting_bid()));
    assert_eq!(subject.get_state().highest_bidder, None);
}

#[test]
fn current_bid_never_decreases() {
    let mut subject = sample_subject();
    let bids = [55, 40, 60, 60, 59, 75, 10, 80];
    let mut previous = subject.get_state().current_bid;

    for (i, amount) in bids.iter().enumerate() {
        subject.place_bid(&format!("Bidder {}", i), usd(*amount));
        let current = subject.get_state().current_bid;
        assert!(current >= previous);
        assert!(current >= sample_starting_bid());
        previous = current;
    }
    assert_eq!(previous, usd(80));
}

#[test]
fn bid_revives_going_once() {
    let mut subject = sample_subject();
    subject.advance_phase_status(AuctionStatus::GoingOnce);

    assert!(subject.place_bid("Alice", usd(55)));
    assert_eq!(subject.status(), AuctionStatus::Active);
}

#[test]
fn phase_status_change_broadcasts() {
    let mut subject = sample_subject();
    let observer = RecordingObserver::new();
    subject.attach("view", observer.boxed());

    subject.advance_phase_status(AuctionStatus::GoingOnce);
    subject.advance_phase_status(AuctionStatus::GoingTwice);

    let statuses: Vec<_> = observer.received().iter().map(|s| s.status).collect();
    assert_eq!(
        statuses,
        vec![AuctionStatus::Active, AuctionStatus::GoingOnce, AuctionStatus::GoingTwice]
    );
}

#[test]
fn phase_status_cannot_set_sold() {
    let mut subject = sample_subject();
    let observer = RecordingObserver::new();
    subject.attach("view", observer.boxed());

    subject.advance_phase_status(AuctionStatus::Sold);

    assert_eq!(subject.status(), AuctionStatus::Active);
    assert_eq!(observer.count(), 1);
}

#[test]
fn sold_is_terminal() {
    let mut subject = sample_subject();
    subject.place_bid("Alice", usd(55));
    let observer = RecordingObserver::new();
    subject.attach("view", observer.boxed());

    subject.mark_sold();
    let sold = subject.get_state();
    assert_eq!(sold.status, AuctionStatus::Sold);
    assert_eq!(observer.count(), 2);

    assert!(!subject.place_bid("Bob", usd(100)));
    subject.advance_phase_status(AuctionStatus::GoingOnce);
    subject.advance_phase_status(AuctionStatus::Active);
    subject.mark_sold();

    assert_eq!(subject.get_state(), sold);
    assert_eq!(observer.count(), 2);
    assert_eq!(sold.try_get_amount_and_winner(), Some((usd(55), "Alice".to_string())));
}

#[test]
fn sold_without_bids_has_no_winner() {
    let mut subject = sample_subject();
    subject.mark_sold();

    assert!(subject.get_state().has_ended());
    assert_eq!(subject.get_state().try_get_amount_and_winner(), None);
}

#[test]
fn reset_reopens_and_keeps_observers() {
    let mut subject = sample_subject();
    subject.place_bid("Alice", usd(55));
    subject.mark_sold();
    let observer = RecordingObserver::new();
    subject.attach("view", observer.boxed());

    subject.reset();

    let state = subject.get_state();
    assert_eq!(state.item_name, format!("{} #2", sample_item_name()));
    assert_eq!(state.current_bid, state.starting_bid);
    assert_eq!(state.highest_bidder, None);
    assert_eq!(state.status, AuctionStatus::Active);
    assert_eq!(observer.count(), 2);
    assert_eq!(observer.last(), Some(state));
}

#[test]
fn failing_observer_does_not_block_others() {
    let mut subject = sample_subject();
    let failing = FailingObserver::new();
    let healthy = RecordingObserver::new();
    subject.attach("failing", failing.boxed());
    subject.attach("healthy", healthy.boxed());

    assert!(subject.place_bid("Alice", usd(55)));

    assert_eq!(healthy.count(), 2);
    assert_eq!(healthy.last().unwrap().current_bid, usd(55));
    assert_eq!(failing.attempts(), 2);
    // Failing observers are never evicted
    assert!(subject.is_attached("failing"));
}

#[test]
fn panicking_observer_does_not_block_others() {
    let mut subject = sample_subject();
    let healthy = RecordingObserver::new();
    subject.attach("panicking", Box::new(PanickingObserver));
    subject.attach("healthy", healthy.boxed());

    assert!(subject.place_bid("Alice", usd(55)));

    assert_eq!(healthy.count(), 2);
    assert_eq!(subject.observer_count(), 2);
}

#[test]
fn closures_can_observe() {
    let mut subject = sample_subject();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    subject.attach(
        "closure",
        Box::new(FnObserver(move |state: &live_auction::AuctionState| {
            sink.lock().unwrap().push(state.current_bid);
            Ok::<(), ObserverError>(())
        })),
    );

    subject.place_bid("Alice", usd(55));

    assert_eq!(*seen.lock().unwrap(), vec![sample_starting_bid(), usd(55)]);
}
