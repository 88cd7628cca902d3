use std::cell::{Cell, RefCell};
use std::rc::Rc;
use sunpath::{EventHub, Subscription};

#[test]
fn subscribers_receive_events_until_released() {
    let hub: EventHub<u32> = EventHub::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let sub = hub.subscribe(move |v| sink.borrow_mut().push(*v));

    assert_eq!(hub.emit(&1), 1);
    assert_eq!(hub.listener_count(), 1);
    sub.unsubscribe();
    assert_eq!(hub.listener_count(), 0);
    assert_eq!(hub.emit(&2), 0);
    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn dropping_handle_unsubscribes() {
    let hub: EventHub<()> = EventHub::new();
    let hits = Rc::new(Cell::new(0));
    {
        let h = hits.clone();
        let _sub = hub.subscribe(move |_| h.set(h.get() + 1));
        hub.emit(&());
    }
    hub.emit(&());
    assert_eq!(hits.get(), 1);
}

#[test]
fn handle_outliving_hub_is_harmless() {
    let sub = {
        let hub: EventHub<u8> = EventHub::new();
        hub.subscribe(|_| {})
    };
    drop(sub);
}

#[test]
fn listener_may_unsubscribe_another_during_dispatch() {
    let hub: EventHub<()> = EventHub::new();
    let victim_hits = Rc::new(Cell::new(0));
    let victim_slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let slot = victim_slot.clone();
    let _killer = hub.subscribe(move |_| {
        slot.borrow_mut().take();
    });
    let vh = victim_hits.clone();
    *victim_slot.borrow_mut() = Some(hub.subscribe(move |_| vh.set(vh.get() + 1)));

    // The killer runs first and releases the victim before its turn.
    assert_eq!(hub.emit(&()), 1);
    assert_eq!(victim_hits.get(), 0);
    assert_eq!(hub.listener_count(), 1);
}

#[test]
fn listener_may_subscribe_during_dispatch() {
    let hub = Rc::new(EventHub::<u32>::new());
    let added: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));
    let late_hits = Rc::new(Cell::new(0));

    let hub2 = hub.clone();
    let added2 = added.clone();
    let late = late_hits.clone();
    let _adder = hub.subscribe(move |_| {
        let late = late.clone();
        added2
            .borrow_mut()
            .push(hub2.subscribe(move |_| late.set(late.get() + 1)));
    });

    // New listeners join from the next event on.
    hub.emit(&1);
    assert_eq!(late_hits.get(), 0);
    hub.emit(&2);
    assert_eq!(late_hits.get(), 1);
}
