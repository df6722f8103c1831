use std::sync::mpsc;

use coord_app::platform::{History, MemoryHistory};
use pretty_assertions::assert_eq;
use url::Url;

fn url(text: &str) -> Url {
    Url::parse(text).expect("url")
}

#[test]
fn replace_swaps_current_entry_silently() {
    let (tx, rx) = mpsc::channel();
    let mut history = MemoryHistory::new(url("http://localhost/"));
    history.subscribe(tx);

    history.replace(url("http://localhost/?location=a"));

    assert_eq!(history.current().as_str(), "http://localhost/?location=a");
    assert_eq!(history.len(), 1);
    assert_eq!(history.version(), 1);
    assert!(rx.try_recv().is_err());
}

#[test]
fn traversal_notifies_with_landing_url() {
    let (tx, rx) = mpsc::channel();
    let mut history = MemoryHistory::new(url("http://localhost/?location=a"));
    history.subscribe(tx);
    history.push(url("http://localhost/?location=b"));
    assert!(rx.try_recv().is_err());

    assert!(history.back());
    assert_eq!(rx.try_recv().expect("back"), url("http://localhost/?location=a"));
    assert!(!history.back());

    assert!(history.forward());
    assert_eq!(rx.try_recv().expect("forward"), url("http://localhost/?location=b"));
    assert!(!history.forward());
}

#[test]
fn push_drops_forward_entries() {
    let mut history = MemoryHistory::new(url("http://localhost/1"));
    history.push(url("http://localhost/2"));
    assert!(history.back());
    history.push(url("http://localhost/3"));

    assert_eq!(history.len(), 2);
    assert!(!history.forward());
    assert_eq!(history.current().as_str(), "http://localhost/3");
}

#[test]
fn dropped_listener_is_forgotten() {
    let (tx, rx) = mpsc::channel();
    let mut history = MemoryHistory::new(url("http://localhost/1"));
    history.subscribe(tx);
    history.push(url("http://localhost/2"));
    drop(rx);

    assert!(history.back());
    assert!(history.forward());
}
