use super::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn counter() -> (Rc<Cell<usize>>, impl Fn(&u32) + 'static) {
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);
    (count, move |_: &u32| c.set(c.get() + 1))
}

#[test]
fn test_emit_reaches_all_listeners_in_order() {
    let hub: EventHub<u32> = EventHub::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let s1 = Rc::clone(&seen);
    let _a = hub.subscribe(move |e| s1.borrow_mut().push(("a", *e)));
    let s2 = Rc::clone(&seen);
    let _b = hub.subscribe(move |e| s2.borrow_mut().push(("b", *e)));

    hub.emit(&7);
    assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
}

#[test]
fn test_unsubscribe_is_idempotent() {
    let hub: EventHub<u32> = EventHub::new();
    let (count, listener) = counter();
    let sub = hub.subscribe(listener);
    let (other_count, other) = counter();
    let _other = hub.subscribe(other);

    sub.unsubscribe();
    sub.unsubscribe();
    hub.emit(&1);

    assert_eq!(count.get(), 0);
    assert_eq!(other_count.get(), 1);
    assert_eq!(hub.len(), 1);
}

#[test]
fn test_dropping_handle_keeps_listener() {
    let hub: EventHub<u32> = EventHub::new();
    let (count, listener) = counter();
    drop(hub.subscribe(listener));

    hub.emit(&1);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_joined_subscription_cancels_both() {
    let first: EventHub<u32> = EventHub::new();
    let second: EventHub<u32> = EventHub::new();
    let (count, listener) = counter();
    let listener = Rc::new(listener);

    let l1 = Rc::clone(&listener);
    let l2 = Rc::clone(&listener);
    let sub = first
        .subscribe(move |e| l1(e))
        .join(second.subscribe(move |e| l2(e)));

    first.emit(&1);
    second.emit(&1);
    assert_eq!(count.get(), 2);

    sub.unsubscribe();
    first.emit(&1);
    second.emit(&1);
    assert_eq!(count.get(), 2);
    assert!(first.is_empty() && second.is_empty());
}

#[test]
fn test_listener_may_unsubscribe_itself_during_emit() {
    let hub: EventHub<u32> = EventHub::new();
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let (count, _) = counter();

    let inner_slot = Rc::clone(&slot);
    let inner_count = Rc::clone(&count);
    let sub = hub.subscribe(move |_| {
        inner_count.set(inner_count.get() + 1);
        if let Some(sub) = inner_slot.borrow().as_ref() {
            sub.unsubscribe();
        }
    });
    *slot.borrow_mut() = Some(sub);

    hub.emit(&1);
    hub.emit(&2);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_unsubscribe_after_hub_dropped_is_safe() {
    let hub: EventHub<u32> = EventHub::new();
    let (_, listener) = counter();
    let sub = hub.subscribe(listener);
    drop(hub);
    sub.unsubscribe();
}

#[test]
fn test_weak_hub_upgrades_until_last_handle_drops() {
    let hub: EventHub<u32> = EventHub::new();
    let weak = hub.downgrade();
    let (count, listener) = counter();
    let _sub = hub.subscribe(listener);

    let upgraded = weak.upgrade().unwrap();
    upgraded.emit(&1);
    assert_eq!(count.get(), 1);

    drop(upgraded);
    drop(hub);
    assert!(weak.upgrade().is_none());
    assert_eq!(Rc::strong_count(&count), 1);
}
