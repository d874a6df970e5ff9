//! Integration tests for the vtable-bench-internals crate.
//!
//! These tests go through the public [`RawWrap`] API only:
//!
//! - construction and dispatch for several value types and handlers
//! - move semantics (`take`, `take_from`) and the empty state
//! - drop bookkeeping, so every value is destroyed exactly once
//! - downcasting, checked and unchecked

use std::{any::TypeId, cell::RefCell, rc::Rc};

use vtable_bench_internals::{RawWrap, handlers::SpeakHandler};

const HISS: &str = "hisshisshisshiss";

struct Snake {
    idx: usize,
}

struct Owl {
    calls: Vec<char>,
}

#[repr(align(128))]
struct Whale {
    depth: u8,
}

struct Inherent;

impl SpeakHandler<Snake> for Inherent {
    fn speak(value: &Snake) -> char {
        HISS.as_bytes()[value.idx] as char
    }
}

impl SpeakHandler<Owl> for Inherent {
    fn speak(value: &Owl) -> char {
        value.calls.last().copied().unwrap_or('_')
    }
}

impl SpeakHandler<Whale> for Inherent {
    fn speak(value: &Whale) -> char {
        if value.depth > 100 { 'W' } else { 'w' }
    }
}

struct Shouting;

impl SpeakHandler<Snake> for Shouting {
    fn speak(value: &Snake) -> char {
        Inherent::speak(value).to_ascii_uppercase()
    }
}

#[derive(Debug)]
struct DropLog {
    name: &'static str,
    log: Rc<RefCell<Vec<String>>>,
}

impl DropLog {
    fn new(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Self {
        log.borrow_mut().push(format!("Created: {name}"));
        Self {
            name,
            log: log.clone(),
        }
    }
}

impl Drop for DropLog {
    fn drop(&mut self) {
        self.log.borrow_mut().push(format!("Dropped: {}", self.name));
    }
}

struct FirstLetter;

impl SpeakHandler<DropLog> for FirstLetter {
    fn speak(value: &DropLog) -> char {
        value.name.chars().next().unwrap_or(' ')
    }
}

#[test]
fn test_speak_for_each_index() {
    for idx in 0..HISS.len() {
        let wrap = RawWrap::new::<Snake, Inherent>(Snake { idx });
        let expected = HISS.as_bytes()[idx] as char;
        assert_eq!(wrap.speak(), expected);
        assert_eq!(wrap.speak(), expected, "speak must be idempotent");
    }
}

#[test]
fn test_handler_selects_behavior() {
    let plain = RawWrap::new::<Snake, Inherent>(Snake { idx: 0 });
    let loud = RawWrap::new::<Snake, Shouting>(Snake { idx: 0 });

    assert_eq!(plain.speak(), 'h');
    assert_eq!(loud.speak(), 'H');
    assert_eq!(plain.type_id(), loud.type_id());
}

#[test]
fn test_heap_owning_values() {
    let wrap = RawWrap::new::<Owl, Inherent>(Owl {
        calls: vec!['h', 'o', 'o'],
    });
    assert_eq!(wrap.speak(), 'o');

    let owl = wrap.downcast_ref::<Owl>().unwrap();
    assert_eq!(owl.calls.len(), 3);
}

#[test]
fn test_over_aligned_values() {
    let wraps: Vec<RawWrap> = (0..16u8)
        .map(|i| RawWrap::new::<Whale, Inherent>(Whale { depth: i * 10 }))
        .collect();

    for (i, wrap) in wraps.iter().enumerate() {
        let whale = wrap.downcast_ref::<Whale>().unwrap();
        assert_eq!(whale as *const Whale as usize % 128, 0);
        assert_eq!(wrap.speak(), if i * 10 > 100 { 'W' } else { 'w' });
    }
}

#[test]
fn test_downcast() {
    let wrap = RawWrap::new::<Snake, Inherent>(Snake { idx: 3 });

    assert_eq!(wrap.type_id(), Some(TypeId::of::<Snake>()));
    assert!(wrap.type_name().unwrap().ends_with("Snake"));
    assert!(wrap.downcast_ref::<Owl>().is_none());
    assert_eq!(wrap.downcast_ref::<Snake>().map(|s| s.idx), Some(3));

    // SAFETY: The wrapper holds a `Snake`.
    let snake = unsafe { wrap.downcast_unchecked::<Snake>() };
    assert_eq!(snake.idx, 3);
}

#[test]
fn test_move_transfers_validity() {
    let mut source = RawWrap::new::<Snake, Inherent>(Snake { idx: 1 });
    let before = source.speak();

    let destination = source.take();

    assert!(source.is_empty());
    assert!(!destination.is_empty());
    assert_eq!(destination.speak(), before);
    assert_eq!(source.type_id(), None);
    assert!(source.downcast_ref::<Snake>().is_none());
}

#[test]
fn test_native_move_keeps_value() {
    let source = RawWrap::new::<Snake, Inherent>(Snake { idx: 2 });
    let mut collection = Vec::new();
    collection.push(source);

    let moved = collection.pop().unwrap();
    assert_eq!(moved.speak(), 's');
}

#[test]
fn test_move_assign_into_empty() {
    let mut destination = RawWrap::empty();
    let mut source = RawWrap::new::<Snake, Inherent>(Snake { idx: 0 });

    destination.take_from(&mut source);

    assert!(source.is_empty());
    assert_eq!(destination.speak(), 'h');
}

#[test]
fn test_drop_behavior() {
    let log = Rc::new(RefCell::new(Vec::<String>::new()));

    {
        let wrap = RawWrap::new::<DropLog, FirstLetter>(DropLog::new("solo", &log));
        assert_eq!(wrap.speak(), 's');
    }
    assert_eq!(*log.borrow(), ["Created: solo", "Dropped: solo"]);
    log.borrow_mut().clear();

    // A moved-from shell drops nothing; the destination drops exactly once.
    {
        let mut source = RawWrap::new::<DropLog, FirstLetter>(DropLog::new("moved", &log));
        let destination = source.take();
        drop(source);
        assert_eq!(*log.borrow(), ["Created: moved"]);
        drop(destination);
    }
    assert_eq!(*log.borrow(), ["Created: moved", "Dropped: moved"]);
    log.borrow_mut().clear();

    // Move-assigning over a valid wrapper destroys the old value first.
    {
        let mut destination = RawWrap::new::<DropLog, FirstLetter>(DropLog::new("old", &log));
        let mut source = RawWrap::new::<DropLog, FirstLetter>(DropLog::new("new", &log));
        destination.take_from(&mut source);
        assert_eq!(
            *log.borrow(),
            ["Created: old", "Created: new", "Dropped: old"]
        );
        assert_eq!(destination.speak(), 'n');
    }
    assert_eq!(
        *log.borrow(),
        ["Created: old", "Created: new", "Dropped: old", "Dropped: new"]
    );
}

#[test]
fn test_collection_drop() {
    let log = Rc::new(RefCell::new(Vec::<String>::new()));
    let names = ["a", "b", "c", "d"];

    let mut wraps: Vec<RawWrap> = names
        .iter()
        .map(|&name| RawWrap::new::<DropLog, FirstLetter>(DropLog::new(name, &log)))
        .collect();

    let speech: String = wraps.iter().map(RawWrap::speak).collect();
    assert_eq!(speech, "abcd");

    wraps.remove(1);
    assert_eq!(log.borrow().last().map(String::as_str), Some("Dropped: b"));

    drop(wraps);
    let dropped = log
        .borrow()
        .iter()
        .filter(|entry| entry.starts_with("Dropped"))
        .count();
    assert_eq!(dropped, names.len());
}
